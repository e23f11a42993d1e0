mod audio;
mod config;
mod error;
mod library;
mod macros;
mod playlist;
mod prompt;
mod queue;
mod resolver;
mod runtime;
mod session;
mod shell;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    runtime::run()
}
