//! Generic prefix resolver.
//!
//! One resolver serves every name lookup in the shell: top-level commands,
//! `queue`/`macro` sub-commands and track names. Callers only vary the
//! candidate set and the [`Subject`], which picks the wording of the
//! not-found and autocomplete-disabled reports.

use serde::Deserialize;

use crate::prompt::Prompt;

/// How strictly ambiguous prefixes are handled.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmbiguityPolicy {
    /// Never pick between multiple matches.
    Disabled,
    /// Print the matches and let the user retype.
    #[serde(alias = "report_only")]
    ReportOnly,
    /// Offer a numbered selection prompt.
    Interactive,
}

impl Default for AmbiguityPolicy {
    fn default() -> Self {
        Self::ReportOnly
    }
}

/// What kind of name is being resolved. Only affects messages.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Subject {
    Command,
    Track,
}

/// Resolve `input` as a prefix of one of `candidates`.
///
/// A unique prefix resolves under every policy; the policy only decides
/// what happens when several candidates share the prefix.
pub fn resolve<'a>(
    policy: AmbiguityPolicy,
    input: &str,
    candidates: &[&'a str],
    subject: Subject,
    prompt: &mut dyn Prompt,
) -> Option<&'a str> {
    let mut matches: Vec<&'a str> = candidates
        .iter()
        .copied()
        .filter(|c| c.starts_with(input))
        .collect();
    matches.sort_unstable();

    match matches.len() {
        0 => {
            match subject {
                Subject::Command => println!("Invalid command"),
                Subject::Track => println!("Song not found"),
            }
            None
        }
        1 => Some(matches[0]),
        _ => match policy {
            AmbiguityPolicy::Disabled => {
                match subject {
                    Subject::Command => println!("Autocomplete is disabled"),
                    Subject::Track => println!(
                        "{input} matches more than one song.\n\
                         If you meant to use autocomplete, you should enable it \
                         in your config file."
                    ),
                }
                None
            }
            AmbiguityPolicy::ReportOnly => {
                let kind = match subject {
                    Subject::Command => "command",
                    Subject::Track => "song",
                };
                println!("Ambiguous {kind}, could be one of {}", matches.join(", "));
                None
            }
            AmbiguityPolicy::Interactive => select(&matches, prompt),
        },
    }
}

fn select<'a>(matches: &[&'a str], prompt: &mut dyn Prompt) -> Option<&'a str> {
    for (idx, m) in matches.iter().enumerate() {
        println!("    {}: {m}", idx + 1);
    }

    let mut answer = prompt.read_line(&format!(
        "Select from the options above (1-{}) or leave blank to cancel: ",
        matches.len()
    ))?;
    loop {
        let trimmed = answer.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<usize>() {
            Ok(n) if (1..=matches.len()).contains(&n) => return Some(matches[n - 1]),
            _ => {
                answer =
                    prompt.read_line(&format!("Please enter a number from 1-{}: ", matches.len()))?
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::testing::ScriptedPrompt;

    #[test]
    fn unique_prefix_resolves_under_every_policy() {
        let set = ["play", "stop", "status"];
        for policy in [
            AmbiguityPolicy::Disabled,
            AmbiguityPolicy::ReportOnly,
            AmbiguityPolicy::Interactive,
        ] {
            let mut prompt = ScriptedPrompt::empty();
            assert_eq!(
                resolve(policy, "p", &set, Subject::Command, &mut prompt),
                Some("play")
            );
        }
    }

    #[test]
    fn no_match_resolves_to_nothing() {
        let set = ["play", "stop"];
        let mut prompt = ScriptedPrompt::empty();
        assert_eq!(
            resolve(
                AmbiguityPolicy::Interactive,
                "x",
                &set,
                Subject::Command,
                &mut prompt
            ),
            None
        );
    }

    #[test]
    fn ambiguous_prefix_is_never_guessed_without_interaction() {
        let set = ["stop", "status"];
        for policy in [AmbiguityPolicy::Disabled, AmbiguityPolicy::ReportOnly] {
            let mut prompt = ScriptedPrompt::empty();
            assert_eq!(
                resolve(policy, "st", &set, Subject::Command, &mut prompt),
                None
            );
        }
    }

    #[test]
    fn interactive_selection_picks_by_index_over_sorted_matches() {
        let set = ["swap", "status", "stop"];
        // Matches are sorted: status, stop, swap.
        let mut prompt = ScriptedPrompt::new(["2"]);
        assert_eq!(
            resolve(
                AmbiguityPolicy::Interactive,
                "s",
                &set,
                Subject::Command,
                &mut prompt
            ),
            Some("stop")
        );
    }

    #[test]
    fn interactive_selection_reprompts_until_valid() {
        let set = ["stop", "status"];
        let mut prompt = ScriptedPrompt::new(["nope", "9", "0", "1"]);
        assert_eq!(
            resolve(
                AmbiguityPolicy::Interactive,
                "st",
                &set,
                Subject::Command,
                &mut prompt
            ),
            Some("status")
        );
    }

    #[test]
    fn interactive_selection_cancels_on_blank_or_eof() {
        let set = ["stop", "status"];

        let mut blank = ScriptedPrompt::new([""]);
        assert_eq!(
            resolve(
                AmbiguityPolicy::Interactive,
                "st",
                &set,
                Subject::Command,
                &mut blank
            ),
            None
        );

        // EOF mid-reprompt also cancels.
        let mut eof = ScriptedPrompt::new(["junk"]);
        assert_eq!(
            resolve(
                AmbiguityPolicy::Interactive,
                "st",
                &set,
                Subject::Track,
                &mut eof
            ),
            None
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let set = ["randomize", "remove"];
        for _ in 0..3 {
            let mut prompt = ScriptedPrompt::new(["1"]);
            assert_eq!(
                resolve(
                    AmbiguityPolicy::Interactive,
                    "r",
                    &set,
                    Subject::Command,
                    &mut prompt
                ),
                Some("randomize")
            );
        }
    }
}
