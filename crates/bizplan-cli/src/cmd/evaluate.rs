use crate::output::{print_json, print_table};
use anyhow::{bail, Context};
use bizplan_core::evaluation::{self, Dimension};
use std::collections::HashMap;
use std::path::Path;

pub fn run(file: Option<&Path>, inline: &[String], json: bool) -> anyhow::Result<()> {
    let mut answers = match file {
        Some(path) => read_answers(path)?,
        None => HashMap::new(),
    };
    for pair in inline {
        let (id, text) = parse_pair(pair)?;
        answers.insert(id, text);
    }

    let unknown: Vec<&str> = answers
        .keys()
        .map(String::as_str)
        .filter(|k| !is_known_question(k))
        .collect();
    if !unknown.is_empty() {
        tracing::warn!("ignoring unknown evaluation questions: {}", unknown.join(", "));
    }

    let result = evaluation::evaluate(&answers);

    if json {
        return print_json(&result);
    }

    let rows = result
        .dimensions
        .iter()
        .map(|d| {
            let marker = if d.dimension == result.weakest { "weakest" } else { "" };
            vec![d.dimension.to_string(), d.score.to_string(), marker.to_string()]
        })
        .collect();
    print_table(&["DIMENSION", "SCORE", ""], rows);
    println!();
    println!("Total:           {}", result.total_score);
    println!("Grade:           {:?}", result.grade);
    println!("Pass likelihood: {}%", result.pass_likelihood);
    Ok(())
}

fn is_known_question(id: &str) -> bool {
    Dimension::all()
        .iter()
        .any(|d| d.questions().iter().any(|q| *q == id))
}

/// YAML is a superset of JSON, so one parser reads both.
fn read_answers(path: &Path) -> anyhow::Result<HashMap<String, String>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_str(&data).with_context(|| format!("failed to parse {}", path.display()))
}

fn parse_pair(pair: &str) -> anyhow::Result<(String, String)> {
    match pair.split_once('=') {
        Some((id, text)) if !id.trim().is_empty() => {
            Ok((id.trim().to_string(), text.to_string()))
        }
        _ => bail!("invalid --answer '{pair}': expected question_id=text"),
    }
}
