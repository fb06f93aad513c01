use clap::Parser;
use colored::Colorize;
use log::{debug, info};

use crate::cli::arguments::{Arguments, Command};
use crate::cli::key_type::KeyType;
use crate::config::Settings;
use crate::error::Error;
use crate::skill::{Response, Skill};

pub mod arguments;
pub mod interact;
pub mod key_type;

/// Start the cli program.
///
/// This parses the arguments passed in the command line, loads the settings and runs the
/// appropriate command.
pub async fn run() -> Result<(), Error> {
    let arguments = Arguments::parse();
    debug!("{:?}", arguments);

    let mut settings = Settings::read_toml(&arguments.config)?.with_env();
    if let Some(lang) = arguments.lang {
        settings.lang = lang;
    }
    if let Some(units) = arguments.units {
        settings.units = units;
    }
    let mut skill = Skill::from_settings(settings)?;

    match arguments.command {
        Command::Ask(command) => ask_command(&mut skill, &command.text()).await,
        Command::Interactive => interactive_command(&mut skill).await,
        Command::Sources => sources_command(&skill).await,
        Command::Raw(command) => raw_command(&skill, &command.text()).await,
        Command::Visual(command) => visual_command(&skill, &command.text()).await,
    }
}

async fn ask_command(skill: &mut Skill, utterance: &str) -> Result<(), Error> {
    let response = skill.handle_utterance(utterance).await?;
    print_response(&response);

    Ok(())
}

async fn interactive_command(skill: &mut Skill) -> Result<(), Error> {
    info!("Starting interactive session...");

    let choices = [
        KeyType::Enter,
        KeyType::Key('s'),
        KeyType::Key('q'),
        KeyType::CtrlC,
    ];

    loop {
        let utterance = interact::user_input(
            "What do you want to know?",
            |i| !i.is_empty(),
            "Ask a question:",
        )?;
        print_response(&skill.handle_utterance(&utterance).await?);

        loop {
            match interact::user_choice(
                &format!(
                    "Ask another question, send the {} or {}",
                    "source".bright_blue(),
                    "quit".bright_blue()
                ),
                &choices,
            )? {
                KeyType::Key('s') => print_response(&skill.handle_get_sources().await?),
                KeyType::Key('q') | KeyType::CtrlC => return Ok(()),
                _ => break,
            }
        }
    }
}

async fn sources_command(skill: &Skill) -> Result<(), Error> {
    print_response(&skill.handle_get_sources().await?);

    Ok(())
}

async fn raw_command(skill: &Skill, query: &str) -> Result<(), Error> {
    match skill.text_result(query).await? {
        Some(result) => println!("{result}"),
        None => println!("{}", "No results".bright_black()),
    }

    Ok(())
}

async fn visual_command(skill: &Skill, query: &str) -> Result<(), Error> {
    match skill.visual_answer(query).await? {
        Some(visual) => {
            println!("{}", visual.title.bold());
            if let Some(answer) = visual.answer {
                println!("{answer}");
            }
            if let Some(image) = visual.image {
                println!("Image saved to {}", image.display());
            }
        }
        None => println!("{}", "No visual answer".bright_black()),
    }

    Ok(())
}

fn print_response(response: &Response) {
    match response {
        Response::Answer(query_match) => {
            debug!("Answered \"{}\" ({:?})", query_match.phrase, query_match.level);
            println!("{}", response.text().bold());
        }
        Response::Dialog { .. } => println!("{}", response.text()),
    }
}
