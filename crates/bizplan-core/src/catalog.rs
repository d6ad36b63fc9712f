//! Static six-step business-plan questionnaire.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Text,
    Textarea,
    Number,
    Select,
    MultiSelect,
    Checkbox,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: QuestionKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub options: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct StepDefinition {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub questions: &'static [QuestionDefinition],
}

impl StepDefinition {
    pub fn question(&self, id: &str) -> Option<&QuestionDefinition> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn required_questions(&self) -> impl Iterator<Item = &QuestionDefinition> {
        self.questions.iter().filter(|q| q.required)
    }
}

const fn q(
    id: &'static str,
    label: &'static str,
    kind: QuestionKind,
    required: bool,
) -> QuestionDefinition {
    QuestionDefinition {
        id,
        label,
        kind,
        required,
        placeholder: None,
        options: &[],
    }
}

const INDUSTRIES: &[&str] = &[
    "it_software",
    "manufacturing",
    "bio_healthcare",
    "content_media",
    "commerce",
    "other",
];

const STAGES: &[&str] = &["idea", "prototype", "mvp", "early_revenue", "scaling"];

const CHANNELS: &[&str] = &["online_ads", "sns", "partnership", "direct_sales", "community"];

static STEPS: [StepDefinition; 6] = [
    StepDefinition {
        id: 1,
        title: "Company Overview",
        description: "Basic information about the company and the item.",
        questions: &[
            QuestionDefinition {
                placeholder: Some("e.g. Acme Labs"),
                ..q("company_name", "Company name", QuestionKind::Text, true)
            },
            q("item_name", "Product or service name", QuestionKind::Text, true),
            QuestionDefinition {
                placeholder: Some("Describe the item in one sentence"),
                ..q("one_liner", "One-line summary", QuestionKind::Text, true)
            },
            QuestionDefinition {
                options: INDUSTRIES,
                ..q("industry", "Industry", QuestionKind::Select, false)
            },
            q("founded_year", "Year founded", QuestionKind::Number, false),
        ],
    },
    StepDefinition {
        id: 2,
        title: "Problem Recognition",
        description: "The problem being solved and who has it.",
        questions: &[
            q("problem", "Problem statement", QuestionKind::Textarea, true),
            q("target_customer", "Target customer", QuestionKind::Textarea, true),
            q("market_research", "Market research findings", QuestionKind::Textarea, false),
        ],
    },
    StepDefinition {
        id: 3,
        title: "Solution",
        description: "How the item solves the problem and why it wins.",
        questions: &[
            q("solution", "Solution", QuestionKind::Textarea, true),
            q("differentiation", "Differentiation", QuestionKind::Textarea, true),
            QuestionDefinition {
                options: STAGES,
                ..q("development_stage", "Development stage", QuestionKind::Select, false)
            },
        ],
    },
    StepDefinition {
        id: 4,
        title: "Growth Strategy",
        description: "Business model, market size and go-to-market.",
        questions: &[
            q("business_model", "Business model", QuestionKind::Textarea, true),
            q("market_size", "Market size (TAM/SAM/SOM)", QuestionKind::Textarea, true),
            QuestionDefinition {
                options: CHANNELS,
                ..q("marketing_channels", "Marketing channels", QuestionKind::MultiSelect, false)
            },
        ],
    },
    StepDefinition {
        id: 5,
        title: "Team",
        description: "The founding team and partners.",
        questions: &[
            q("team_lead", "Representative background", QuestionKind::Textarea, true),
            q("team_members", "Team members", QuestionKind::Textarea, false),
            q("has_partners", "Partner network in place", QuestionKind::Checkbox, false),
        ],
    },
    StepDefinition {
        id: 6,
        title: "Financial Plan",
        description: "Funding needs and revenue outlook.",
        questions: &[
            q("funding_required", "Funding required (KRW)", QuestionKind::Number, true),
            q("revenue_plan", "Revenue plan", QuestionKind::Textarea, true),
            q("milestones", "Key milestones", QuestionKind::Textarea, false),
        ],
    },
];

pub const TOTAL_STEPS: u32 = 6;

pub fn steps() -> &'static [StepDefinition] {
    &STEPS
}

pub fn step(id: u32) -> Option<&'static StepDefinition> {
    STEPS.iter().find(|s| s.id == id)
}
