//! The personalization questionnaire shown before submitting.
//!
//! Option text is kept exactly as published, including trailing spaces and
//! the repeated entries in questions 2 and 4. Toggling one of the repeated
//! labels selects or clears all of its copies at once, since selection is by
//! text.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub prompt: &'static str,
    pub options: &'static [&'static str],
}

pub static QUESTIONS: [Question; 7] = [
    Question {
        id: 1,
        prompt: "Which segment does your company belong to?",
        options: &[
            "Aerospace",
            "Automotive",
            "Gaming",
            "Hospitality",
            "Manufacturing",
            "Mining",
            "Retail",
            "Agriculture",
            "Consumer Goods ",
            "Enterprise Technology",
            "Government",
            "Insurance",
            "Marketing & Advertising ",
            "Non-Profit Organization ",
            "Professional Services ",
            "Banking and Finance Sector ",
            "Consumer Technology ",
            "Financial Services ",
            "Healthcare",
            "Life Sciences ",
            "Media",
            "Transportation and Logistics ",
            "Wholesale and Distribution ",
        ],
    },
    Question {
        id: 2,
        prompt: "Which segment does your company belong to?",
        options: &[
            "Startup",
            "Scale Startup",
            "SME",
            "Government/Public Sector ",
            "Non-profit Organizations",
            "Mid Enterprises",
            "Mid Enterprises",
            "Mid Enterprises",
        ],
    },
    Question {
        id: 3,
        prompt: "What stage is your AI adoption currently in?",
        options: &[
            "Conceptualized: Use case defined, PoC pending ",
            "Proof of Concept (PoC) Completed ",
            "In Production with Challenges ",
            "Not Yet Defined",
        ],
    },
    Question {
        id: 4,
        prompt: "Select your primary focus area(s) for AI Agent and Agentic AI use cases (choose one or more) :",
        options: &[
            "Data Insights and Analytics  ",
            "Business Intelligence",
            "Knowledge Management",
            "Customer Behavior Analysis ",
            "Customer Behavior Analysis ",
            "Customer Behavior Analysis ",
            "IT Operations ",
            "Customer Operations ",
            "Risk and Fraud Detection ",
            "Software Development Testing ",
            "Predictive and Forecasting Models ",
            "Real-Time Decision-Making ",
            "Process Optimization  ",
            "Resource and Inventory Management  ",
            "Market Trends and Competitive Analysis  ",
            "Compliance and Regulatory Reporting  ",
            "Operational Performance Monitoring ",
            "Custom Use Case (Please specify) ",
        ],
    },
    Question {
        id: 5,
        prompt: "What is your current method for getting insights from data?  ",
        options: &[
            "Traditional BI Tools , RPA-Based Solutions ",
            "Cloud-Based Analytics Platforms",
            "No AI-based Insights Yet",
            "Other (Please specify)",
        ],
    },
    Question {
        id: 6,
        prompt: "What data sources will you integrate with AI Agents? ",
        options: &[
            "On-prem SQL/NoSQL Databases ",
            "Cloud storage, Excel, etc. ",
            "Other (Please specify)",
        ],
    },
    Question {
        id: 7,
        prompt: "What would success look like for your organization after implementing AI Agents and Agentic Workflow?  ",
        options: &[
            "Faster decision-making ",
            "Improved data accuracy and insights ",
            "Greater operational efficiency ",
            "Enhanced customer experiences ",
            "Increased innovation and adaptability ",
            "Other (Please specify) ",
        ],
    },
];

/// Where "Back" lands from the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionBack {
    /// Moved to the previous question.
    Previous,
    /// Already on the first question; the wizard should return to the form.
    LeaveQuestionnaire,
}

/// Cursor over [`QUESTIONS`] plus the answers picked so far.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    index: usize,
    answers: BTreeMap<u32, Vec<String>>,
    progress: f64,
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::new()
    }
}

impl Questionnaire {
    pub fn new() -> Self {
        Questionnaire {
            index: 0,
            answers: BTreeMap::new(),
            progress: 0.0,
        }
    }

    pub fn current(&self) -> &'static Question {
        &QUESTIONS[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn question_count(&self) -> usize {
        QUESTIONS.len()
    }

    /// On the last question "Next" becomes "Submit".
    pub fn is_last(&self) -> bool {
        self.index + 1 >= QUESTIONS.len()
    }

    /// Completion in percent, as last computed by [`next`](Self::next) or
    /// [`back`](Self::back).
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Add `option` to the question's answers, or remove it if already there.
    pub fn toggle(&mut self, question_id: u32, option: &str) {
        let selected = self.answers.entry(question_id).or_default();
        if selected.iter().any(|o| o == option) {
            selected.retain(|o| o != option);
        } else {
            selected.push(option.to_string());
        }
    }

    pub fn is_selected(&self, question_id: u32, option: &str) -> bool {
        self.answers(question_id).iter().any(|o| o == option)
    }

    pub fn answers(&self, question_id: u32) -> &[String] {
        self.answers
            .get(&question_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Advance one question. Does nothing on the last one.
    ///
    /// Progress becomes `(index + 1) / total`, measured from the question
    /// being left.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.progress = (self.index + 1) as f64 / self.question_count() as f64 * 100.0;
        self.index += 1;
        true
    }

    /// Step back one question.
    ///
    /// Progress becomes `index / total`, measured from the question being
    /// left. This is one step behind what `next` would report for the same
    /// position.
    pub fn back(&mut self) -> QuestionBack {
        if self.index == 0 {
            return QuestionBack::LeaveQuestionnaire;
        }
        self.progress = self.index as f64 / self.question_count() as f64 * 100.0;
        self.index -= 1;
        QuestionBack::Previous
    }

    /// Answers keyed by question id, skipping questions with nothing picked.
    pub fn responses(&self) -> Vec<QuestionResponse> {
        self.answers
            .iter()
            .filter(|(_, options)| !options.is_empty())
            .map(|(id, options)| QuestionResponse {
                question_id: *id,
                selected: options.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionResponse {
    pub question_id: u32,
    pub selected: Vec<String>,
}
