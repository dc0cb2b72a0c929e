//! Course recommendation survey command.

use std::collections::HashMap;

use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;

use waypoint_core::capability::COURSE_RECOMMENDER_ROUTE;
use waypoint_recorder::RecommendationProducer;

use super::App;

pub async fn run(app: &mut App, keywords: &str, location: &str) -> Result<()> {
    let producer =
        RecommendationProducer::new(app.client.recommender().clone(), app.recorder.clone());
    let mut editor = DefaultEditor::new()?;

    let survey = producer.start(keywords, location).await?;
    if let Some(message) = &survey.message {
        println!("{message}\n");
    }
    if survey.questions.is_empty() {
        println!("{}", "No survey to answer; nothing to recommend.".yellow());
        return Ok(());
    }

    let mut answers: HashMap<String, String> = HashMap::new();
    for question in &survey.questions {
        println!("{}", question.text.bold());
        let answer = editor.readline("answer> ")?;
        answers.insert(question.id.clone(), answer.trim().to_string());
        println!();
    }

    let result = producer
        .submit(
            COURSE_RECOMMENDER_ROUTE,
            keywords,
            location,
            &survey.request_id,
            &answers,
        )
        .await?;
    app.drain_events();

    match result.recommendations.as_deref() {
        Some([]) | None => println!("{}", "No recommendations found.".yellow()),
        Some(recommendations) => {
            println!("{}", "Recommendations".bold().green());
            for (idx, item) in recommendations.iter().enumerate() {
                let title = item
                    .get("title")
                    .and_then(|v| v.as_str())
                    .unwrap_or("(untitled)");
                println!("{}. {title}", idx + 1);
                if let Some(provider) = item.get("provider").and_then(|v| v.as_str()) {
                    println!("   {provider}");
                }
            }
        }
    }

    Ok(())
}
