//! Career suggestion wizard command.

use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;

use waypoint_core::capability::CAREER_SUGGESTER_ROUTE;
use waypoint_recorder::SuggestionProducer;

use super::App;

pub async fn run(app: &mut App) -> Result<()> {
    let producer = SuggestionProducer::new(app.client.suggester().clone(), app.recorder.clone());
    let mut editor = DefaultEditor::new()?;

    println!("{}\n", "Career suggestion wizard".bold());

    let mut step = producer.start().await?;
    while let Some(question) = step.next_question.clone() {
        println!("{}", question.text.bold());
        let answer = editor.readline("answer> ")?;
        let answer = answer.trim();
        if answer.is_empty() {
            println!("{}", "An answer is required.".yellow());
            continue;
        }

        let index = step.current_question_index.unwrap_or(0);
        step = producer
            .answer(
                CAREER_SUGGESTER_ROUTE,
                &question,
                answer,
                index,
                &step.answers_so_far,
            )
            .await?;
        app.drain_events();
        println!();
    }

    match &step.suggestions {
        Some(suggestions) => {
            println!("{}", "Suggestions".bold().green());
            println!("{}", serde_json::to_string_pretty(suggestions)?);
        }
        None => println!("{}", "The wizard finished without suggestions.".yellow()),
    }

    Ok(())
}
