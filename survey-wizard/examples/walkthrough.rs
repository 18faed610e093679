//! Walk a two-question survey end to end against the in-memory backend.

use survey_wizard::{
    AnswerStore, AnswerType, MemoryStore, Question, StaticSource, Survey, SurveyId, SurveySession,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let source = StaticSource::new().with_survey(
        Survey::new("team-health", "Team health check"),
        vec![
            Question::new("q-focus", "How focused was the sprint?", AnswerType::Rating),
            Question::new("q-notes", "Anything else to share?", AnswerType::Text),
        ],
    );

    let survey_id = SurveyId::new("team-health");
    let mut session = SurveySession::open(MemoryStore::new(), &source, &source, &survey_id).await?;

    println!("=== {} ===", session.survey().name());

    println!("{}", session.active_question().unwrap().prompt());
    session.edit_rating(4)?;
    session.next()?;

    println!("{}", session.active_question().unwrap().prompt());
    session.edit_text("More pairing time, please.")?;

    let report = session.finish().await?;
    println!(
        "All steps completed - submitted {} answers",
        report.submitted().len()
    );

    for id in report.submitted() {
        let answer = session.store().answer_by_id(id).await?;
        println!("  {} -> {:?}", answer.question_id(), answer.value());
    }

    Ok(())
}
