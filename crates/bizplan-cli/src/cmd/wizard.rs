use crate::output::{print_json, print_table};
use anyhow::{bail, Context};
use bizplan_core::{
    catalog,
    storage::LocalStore,
    wizard::{AnswerValue, WizardProgress},
    BizplanError,
};
use clap::{Subcommand, ValueEnum};
use serde::Serialize;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum WizardSubcommand {
    /// Current step and overall progress
    Show,

    /// List all steps with completion status
    Steps,

    /// Show one step's questions and answers (default: current step)
    Step { step: Option<u32> },

    /// Record an answer
    Answer {
        question: String,
        value: String,
        /// Step the question belongs to (default: current step)
        #[arg(long)]
        step: Option<u32>,
        /// How to interpret VALUE
        #[arg(long, value_enum, default_value_t = ValueKind::Text)]
        kind: ValueKind,
    },

    /// Remove an answer
    Clear {
        question: String,
        #[arg(long)]
        step: Option<u32>,
    },

    /// Advance one step
    Next,

    /// Go back one step
    Prev,

    /// Jump to a step
    Goto { step: u32 },

    /// Discard all answers and return to step 1
    Reset,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ValueKind {
    Text,
    Number,
    Bool,
    /// Comma-separated list
    List,
}

impl ValueKind {
    fn parse(self, raw: &str) -> anyhow::Result<AnswerValue> {
        Ok(match self {
            ValueKind::Text => AnswerValue::Text(raw.to_string()),
            ValueKind::Number => {
                let n = raw
                    .trim()
                    .parse::<f64>()
                    .with_context(|| format!("'{raw}' is not a number"))?;
                if !n.is_finite() {
                    bail!("'{raw}' is not a finite number");
                }
                AnswerValue::Number(n)
            }
            ValueKind::Bool => AnswerValue::Bool(
                raw.trim()
                    .parse::<bool>()
                    .with_context(|| format!("'{raw}' is not true or false"))?,
            ),
            ValueKind::List => AnswerValue::List(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        })
    }
}

pub fn run(root: &Path, subcmd: WizardSubcommand, json: bool) -> anyhow::Result<()> {
    let store = LocalStore::new(root);
    let mut wizard = WizardProgress::load(&store).context("failed to load wizard progress")?;

    match subcmd {
        WizardSubcommand::Show => show(&wizard, json),
        WizardSubcommand::Steps => steps(&wizard, json),
        WizardSubcommand::Step { step } => {
            show_step(&wizard, step.unwrap_or(wizard.current_step), json)
        }
        WizardSubcommand::Answer {
            question,
            value,
            step,
            kind,
        } => {
            let step = step.unwrap_or(wizard.current_step);
            require_question(step, &question)?;
            let value = kind.parse(&value)?;
            wizard.update_step_data(step, question.as_str(), value);
            save(&store, &wizard)?;
            tracing::debug!(step, question = %question, "answer recorded");
            show_step(&wizard, step, json)
        }
        WizardSubcommand::Clear { question, step } => {
            let step = step.unwrap_or(wizard.current_step);
            if wizard.clear_answer(step, &question).is_none() {
                bail!("step {step} has no answer for '{question}'");
            }
            save(&store, &wizard)?;
            show_step(&wizard, step, json)
        }
        WizardSubcommand::Next => {
            if !wizard.can_proceed() {
                let missing = wizard.missing_required(wizard.current_step);
                eprintln!(
                    "warning: step {} is incomplete (missing: {})",
                    wizard.current_step,
                    missing.join(", ")
                );
            }
            wizard.go_to_next_step();
            save(&store, &wizard)?;
            show(&wizard, json)
        }
        WizardSubcommand::Prev => {
            wizard.go_to_previous_step();
            save(&store, &wizard)?;
            show(&wizard, json)
        }
        WizardSubcommand::Goto { step } => {
            if catalog::step(step).is_none() {
                return Err(BizplanError::StepNotFound(step).into());
            }
            wizard.set_current_step(step);
            save(&store, &wizard)?;
            show(&wizard, json)
        }
        WizardSubcommand::Reset => {
            wizard.reset_wizard();
            save(&store, &wizard)?;
            show(&wizard, json)
        }
    }
}

fn save(store: &LocalStore, wizard: &WizardProgress) -> anyhow::Result<()> {
    wizard.save(store).context("failed to save wizard progress")
}

fn require_question(step: u32, question: &str) -> anyhow::Result<()> {
    let def = catalog::step(step).ok_or(BizplanError::StepNotFound(step))?;
    if def.question(question).is_none() {
        return Err(BizplanError::QuestionNotFound {
            step,
            question: question.to_string(),
        }
        .into());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ProgressView<'a> {
    current_step: u32,
    total_steps: u32,
    progress_percent: u32,
    completed_steps: Vec<u32>,
    can_proceed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<&'a chrono::DateTime<chrono::Utc>>,
}

fn show(wizard: &WizardProgress, json: bool) -> anyhow::Result<()> {
    let view = ProgressView {
        current_step: wizard.current_step,
        total_steps: wizard.total_steps(),
        progress_percent: wizard.progress_percent(),
        completed_steps: wizard.completed_steps(),
        can_proceed: wizard.can_proceed(),
        updated_at: wizard.updated_at.as_ref(),
    };

    if json {
        return print_json(&view);
    }

    let title = catalog::step(view.current_step)
        .map(|s| s.title)
        .unwrap_or("-");
    println!("Step {}/{}: {}", view.current_step, view.total_steps, title);
    println!("Progress: {}%", view.progress_percent);
    if !view.can_proceed {
        let missing = wizard.missing_required(view.current_step);
        if !missing.is_empty() {
            println!("Missing:  {}", missing.join(", "));
        }
    }
    Ok(())
}

fn steps(wizard: &WizardProgress, json: bool) -> anyhow::Result<()> {
    if json {
        let rows: Vec<_> = catalog::steps()
            .iter()
            .map(|s| {
                serde_json::json!({
                    "id": s.id,
                    "title": s.title,
                    "completed": wizard.is_step_completed(s.id),
                    "current": s.id == wizard.current_step,
                })
            })
            .collect();
        return print_json(&rows);
    }

    let rows = catalog::steps()
        .iter()
        .map(|s| {
            let marker = if s.id == wizard.current_step { ">" } else { "" };
            let done = if wizard.is_step_completed(s.id) { "done" } else { "" };
            vec![
                marker.to_string(),
                s.id.to_string(),
                s.title.to_string(),
                done.to_string(),
            ]
        })
        .collect();
    print_table(&["", "STEP", "TITLE", "STATUS"], rows);
    Ok(())
}

fn show_step(wizard: &WizardProgress, step: u32, json: bool) -> anyhow::Result<()> {
    let def = catalog::step(step).ok_or(BizplanError::StepNotFound(step))?;
    let answers = wizard.step_data(step);

    if json {
        return print_json(&serde_json::json!({
            "definition": def,
            "answers": answers,
            "completed": wizard.is_step_completed(step),
            "missing_required": wizard.missing_required(step),
        }));
    }

    println!("Step {}: {}", def.id, def.title);
    println!("{}\n", def.description);
    let rows = def
        .questions
        .iter()
        .map(|q| {
            vec![
                q.id.to_string(),
                if q.required { "*" } else { "" }.to_string(),
                answers
                    .get(q.id)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["QUESTION", "REQ", "ANSWER"], rows);
    Ok(())
}
