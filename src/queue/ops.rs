//! The `queue` command surface.
//!
//! Each subcommand is a method on [`Shell`]; the dispatcher resolves the
//! subcommand name by prefix and calls straight in here. State transitions
//! mutate the session, playback goes through the engine port, durations
//! come from the metadata reader port.

use crate::playlist;
use crate::shell::{QUEUE_COMMANDS, Shell};

use super::format::{humanize, ordinal, timestamp};
use crate::error::QueueError;

impl Shell {
    pub fn queue_command(&mut self, args: &[String]) {
        if args.is_empty() {
            self.queue_show();
            return;
        }
        let Some(sub) = self.resolve_sub(&args[0], QUEUE_COMMANDS) else {
            return;
        };
        let rest = &args[1..];
        match sub {
            "add" => self.queue_add(rest),
            "clear" => self.queue_clear(),
            "find" => self.queue_find(rest),
            "insert" => self.queue_insert(rest),
            "load" => self.queue_load(rest),
            "loop" => self.queue_loop(),
            "next" => self.queue_next(),
            "play" => self.queue_play(),
            "prev" => self.queue_prev(),
            "randomize" => self.queue_randomize(),
            "remove" => self.queue_remove(rest),
            "save" => self.queue_save(rest),
            "shuffle" => self.queue_shuffle(),
            "status" => self.queue_status(),
            "swap" => self.queue_swap(rest),
            _ => {}
        }
    }

    /// Bare `queue`: the active order, humanized and comma-joined.
    fn queue_show(&self) {
        let humanized: Vec<&str> = self
            .session
            .active_queue()
            .iter()
            .map(|s| humanize(s))
            .collect();
        println!("{}", humanized.join(", "));
    }

    pub fn queue_add(&mut self, args: &[String]) {
        if args.is_empty() {
            println!("Usage: queue add <songs...>");
            return;
        }
        for arg in args {
            let Some(song) = self.resolve_track(arg) else {
                continue;
            };
            if self.session.contains(&song) {
                println!("{}", QueueError::DuplicateTrack);
                continue;
            }
            let secs = self.cached_duration(&song);
            if let Err(e) = self.session.add_track(song, secs) {
                println!("{e}");
            }
        }
    }

    pub fn queue_remove(&mut self, args: &[String]) {
        if args.is_empty() {
            println!("Usage: queue remove <songs...>");
            return;
        }
        for arg in args {
            let Some(song) = self.resolve_track(arg) else {
                continue;
            };
            if let Err(e) = self.session.remove_track(&song) {
                println!("{e}");
            }
        }
    }

    pub fn queue_clear(&mut self) {
        self.session.clear();
    }

    /// `queue insert <song> <index> [...]`: move queued tracks to 1-based
    /// canonical positions, pairwise.
    pub fn queue_insert(&mut self, args: &[String]) {
        if args.is_empty() {
            println!("Usage: queue insert <song> <index> [...]");
            return;
        }
        if args.len() % 2 != 0 {
            println!("Expected an even number of arguments");
            return;
        }
        for pair in args.chunks(2) {
            let Some(song) = self.resolve_track(&pair[0]) else {
                continue;
            };
            let Ok(index) = pair[1].parse::<i64>() else {
                println!("Index must be a whole number");
                return;
            };
            let max = self.session.queue.len() + 1;
            if index < 1 || index as usize > max {
                println!("{}", QueueError::InvalidIndex { given: index, max });
                return;
            }
            if let Err(e) = self.session.move_track(&song, index as usize - 1) {
                println!("{e}");
            }
        }
    }

    /// `queue swap <a> <b> [...]`: exchange pairs of queued tracks.
    pub fn queue_swap(&mut self, args: &[String]) {
        if args.is_empty() {
            println!("Usage: queue swap <song> <song> [...]");
            return;
        }
        if args.len() % 2 != 0 {
            println!("Expected an even number of arguments");
            return;
        }
        for pair in args.chunks(2) {
            // Exact names short-circuit the resolver.
            if self.session.contains(&pair[0]) && self.session.contains(&pair[1]) {
                let _ = self.session.swap_tracks(&pair[0], &pair[1]);
                continue;
            }
            let Some(first) = self.resolve_track(&pair[0]) else {
                continue;
            };
            let Some(second) = self.resolve_track(&pair[1]) else {
                continue;
            };
            if let Err(e) = self.session.swap_tracks(&first, &second) {
                println!("{e}");
            }
        }
    }

    pub fn queue_loop(&mut self) {
        self.session.loop_active = !self.session.loop_active;
        println!(
            "Queue loop: {}",
            if self.session.loop_active { "on" } else { "off" }
        );
    }

    pub fn queue_randomize(&mut self) {
        if !self.session.randomize() {
            println!("Nothing to randomize");
        }
    }

    pub fn queue_shuffle(&mut self) {
        if !self.session.toggle_shuffle() {
            println!("Nothing to randomize");
        }
    }

    /// Start (or restart) queue playback at the cursor.
    ///
    /// At the end of the queue the cursor wraps to the front, taking a
    /// fresh shuffle with it when shuffle is active. On success the cursor
    /// advances one slot, holding at the end instead of overrunning.
    pub fn queue_play(&mut self) {
        if self.session.queue.is_empty() {
            println!("Nothing queued");
            return;
        }
        if self.session.position == self.session.queue.len() {
            self.session.position = 0;
            if self.session.shuffle_active {
                self.session.randomize();
            }
        }

        let name = self.session.active_queue()[self.session.position].clone();
        let path = self.settings.library.music_dir.join(&name);
        if let Err(e) = self.engine.load(&path) {
            println!("{e}");
            return;
        }

        self.session.playing_queue = true;
        self.session.current = Some(name);
        self.session.loops = 0;
        self.session.elapsed_offset = 0;
        self.session.paused = false;
        self.session.duration = match self.reader.read_duration(&path) {
            Ok(d) => d.as_secs_f64(),
            Err(e) => {
                log::warn!("couldn't read duration for {}: {e}", path.display());
                0.0
            }
        };
        self.engine.play();

        if self.session.position < self.session.queue.len() {
            self.session.position += 1;
        }
    }

    pub fn queue_next(&mut self) {
        if !self.session.playing_queue {
            if self.session.queue.is_empty() {
                println!("Nothing queued");
            } else {
                println!("Either end of queue already reached or nothing playing");
            }
            return;
        }
        self.engine.stop();
        self.engine.unload();
        self.session.playing_queue = false;
        self.queue_play();
    }

    pub fn queue_prev(&mut self) {
        if !self.session.playing_queue {
            if self.session.queue.is_empty() {
                println!("Nothing queued");
            } else {
                println!("Either end of queue already reached or nothing playing");
            }
        } else if self.session.position > 1 {
            self.session.position -= 2;
            self.queue_play();
        } else {
            println!("Can't go back any further");
        }
    }

    /// Polled once per REPL iteration: should the queue move on to the
    /// next track by itself?
    pub fn should_advance(&mut self) -> bool {
        if self.engine.is_busy() || self.session.paused || !self.session.playing_queue {
            return false;
        }
        if self.session.position < self.session.queue.len() || self.session.loop_active {
            true
        } else {
            // The queue ran out without looping; playback state winds
            // down lazily at the poll instead of in a callback.
            self.session.playing_queue = false;
            false
        }
    }

    pub fn queue_status(&mut self) {
        if !self.session.playing_queue || self.session.active_queue().is_empty() {
            println!("Nothing playing");
            return;
        }
        let total_time: u64 = self.session.durations.values().sum();
        let cur_time =
            self.engine.position_millis() as f64 / 1000.0 + self.session.elapsed_offset as f64;
        let track_time = if self.session.duration > 0.0 {
            cur_time % self.session.duration
        } else {
            0.0
        };

        let queue = self.session.active_queue();
        let idx = self.session.position.max(1).min(queue.len());
        let elapsed: u64 = queue[..idx - 1]
            .iter()
            .map(|n| self.session.durations.get(n).copied().unwrap_or(0))
            .sum();

        let current = self
            .session
            .current
            .as_deref()
            .map(humanize)
            .unwrap_or("N/A");
        let (prev_song, next_song) = if queue.len() == 1 {
            ("N/A".to_string(), "N/A".to_string())
        } else if idx == 1 {
            ("N/A".to_string(), humanize(&queue[idx]).to_string())
        } else if idx == queue.len() {
            (humanize(&queue[idx - 2]).to_string(), "N/A".to_string())
        } else {
            (
                humanize(&queue[idx - 2]).to_string(),
                humanize(&queue[idx]).to_string(),
            )
        };

        println!("Previous song: {prev_song}, next song: {next_song}");
        println!("Currently playing {current} ({idx}/{})", queue.len());
        println!("Total length of playlist: {}", timestamp(total_time));
        let progressed = elapsed as f64 + track_time;
        let percent = if total_time == 0 {
            0.0
        } else {
            100.0 * (progressed / total_time as f64)
        };
        println!(
            "Total time elapsed: {} ({percent:.1}%)",
            timestamp(progressed as u64)
        );
    }

    /// `queue find [songs|positions]`: report where tracks sit in the
    /// active order, with their neighbours and a highlighted window.
    pub fn queue_find(&mut self, args: &[String]) {
        let queue: Vec<String> = self.session.active_queue().to_vec();
        if queue.is_empty() {
            println!("No songs in the queue");
            return;
        }
        let mut humanized: Vec<String> = queue.iter().map(|s| humanize(s).to_string()).collect();

        let targets: Vec<String> = if args.is_empty() {
            match &self.session.current {
                Some(current) => vec![current.clone()],
                None => {
                    println!("Nothing playing");
                    return;
                }
            }
        } else {
            args.to_vec()
        };

        for arg in &targets {
            let song = if !arg.is_empty() && arg.chars().all(|c| c.is_ascii_digit()) {
                // A number is a 1-based position, not a title.
                match arg.parse::<usize>() {
                    Ok(n) if (1..=queue.len()).contains(&n) => queue[n - 1].clone(),
                    _ => {
                        println!("Please enter a valid position between 1-{}", queue.len());
                        continue;
                    }
                }
            } else if queue.contains(arg) {
                arg.clone()
            } else {
                match self.resolve_track(arg) {
                    Some(s) => s,
                    None => continue,
                }
            };

            let Some(idx) = queue.iter().position(|s| s == &song) else {
                println!("{song} is not in the queue");
                continue;
            };
            humanized[idx] = format!("\x1b[4m\x1b[1m{}\x1b[0m", humanized[idx]);
            if queue.len() == 1 {
                println!("{} is 1st in the queue", humanize(&song));
                return;
            }
            if idx == 0 {
                println!(
                    "{} is 1st in the queue, before {}",
                    humanize(&song),
                    humanize(&queue[1])
                );
            } else if idx == queue.len() - 1 {
                println!(
                    "{} is {} in the queue, after {}",
                    humanize(&song),
                    ordinal(idx + 1),
                    humanize(&queue[idx - 1])
                );
            } else {
                println!(
                    "{} is {} in the queue, before {}, and after {}",
                    humanize(&song),
                    ordinal(idx + 1),
                    humanize(&queue[idx + 1]),
                    humanize(&queue[idx - 1])
                );
            }
            println!();
            let lo = idx.saturating_sub(5);
            let hi = (idx + 6).min(queue.len());
            println!("...{}...", humanized[lo..hi].join(", "));
        }
    }

    pub fn queue_save(&mut self, args: &[String]) {
        let Some(name) = args.first() else {
            println!("Usage: queue save <name>");
            return;
        };
        if let Err(e) = playlist::save(&self.settings.playlist.dir, name, &self.session.queue) {
            println!("Couldn't save playlist: {e}");
        }
    }

    pub fn queue_load(&mut self, args: &[String]) {
        let Some(name) = args.first() else {
            match playlist::list(&self.settings.playlist.dir) {
                Ok(names) => {
                    println!("Playlists:");
                    for n in names {
                        println!("{n}");
                    }
                }
                Err(e) => println!("Couldn't list playlists: {e}"),
            }
            return;
        };
        match playlist::load(&self.settings.playlist.dir, name) {
            Ok(tracks) => {
                self.session.replace_queue(tracks);
                let names = self.session.queue.clone();
                for track in names {
                    let secs = self.cached_duration(&track);
                    self.session.durations.insert(track, secs);
                }
            }
            Err(e) => println!("{e}"),
        }
    }

    /// Duration in whole seconds via the metadata reader; unreadable files
    /// degrade to 0 so a bad tag can't block queue mutation.
    fn cached_duration(&mut self, track: &str) -> u64 {
        let path = self.settings.library.music_dir.join(track);
        match self.reader.read_duration(&path) {
            Ok(d) => d.as_secs(),
            Err(e) => {
                log::warn!("couldn't read duration for {}: {e}", path.display());
                0
            }
        }
    }
}
