//! Fixed question bank
//!
//! Five questions, each offering one option per personality type. Question
//! order does not affect scoring; only the frequency of chosen tags does.

use serde::Serialize;

use crate::personality::PersonalityType::{self, Analyst, Builder, Connector, Visionary};

/// Number of questions in a complete quiz
pub const QUESTION_COUNT: usize = 5;

/// A single answer option
#[derive(Debug, Clone, Serialize)]
pub struct AnswerOption {
    pub text: &'static str,
    #[serde(rename = "type")]
    pub personality_type: PersonalityType,
}

/// A quiz question with its four options
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: u32,
    pub question: &'static str,
    pub options: [AnswerOption; 4],
}

const fn option(text: &'static str, personality_type: PersonalityType) -> AnswerOption {
    AnswerOption {
        text,
        personality_type,
    }
}

/// The question bank, in presentation order
pub static QUESTIONS: [Question; QUESTION_COUNT] = [
    Question {
        id: 1,
        question: "When starting a new project, you prefer to:",
        options: [
            option("Jump right in and start building", Builder),
            option("Think about the big picture and long-term vision", Visionary),
            option("Discuss it with others and gather feedback", Connector),
            option("Research thoroughly and analyze all aspects", Analyst),
        ],
    },
    Question {
        id: 2,
        question: "In a team setting, you're most likely to:",
        options: [
            option("Take charge of implementation details", Builder),
            option("Share innovative ideas and possibilities", Visionary),
            option("Focus on team dynamics and making sure everyone is heard", Connector),
            option("Evaluate different approaches and identify potential issues", Analyst),
        ],
    },
    Question {
        id: 3,
        question: "When you hear about a new blockchain technology, you first:",
        options: [
            option("Try to build something with it right away", Builder),
            option("Imagine all the potential applications", Visionary),
            option("Share it with your network and discuss possibilities", Connector),
            option("Research how it works and its technical merits", Analyst),
        ],
    },
    Question {
        id: 4,
        question: "Your ideal Web3 project would be:",
        options: [
            option("A practical tool that solves a specific problem", Builder),
            option("Something revolutionary that changes how people think", Visionary),
            option("A platform that brings people together in new ways", Connector),
            option("A system with elegant design and technical excellence", Analyst),
        ],
    },
    Question {
        id: 5,
        question: "When faced with a challenge, you typically:",
        options: [
            option("Roll up your sleeves and work until you solve it", Builder),
            option("Step back and think of creative, unconventional solutions", Visionary),
            option("Reach out to others who might help or collaborate", Connector),
            option("Break it down into smaller parts and analyze each component", Analyst),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_question_offers_each_type_once() {
        for q in QUESTIONS.iter() {
            for tag in PersonalityType::ALL {
                let n = q.options.iter().filter(|o| o.personality_type == tag).count();
                assert_eq!(n, 1, "question {} offers {} {} times", q.id, tag, n);
            }
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let ids: Vec<u32> = QUESTIONS.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_option_serializes_type_field() {
        let json = serde_json::to_value(&QUESTIONS[0].options[2]).unwrap();
        assert_eq!(json["type"], "connector");
        assert!(json["text"].as_str().unwrap().starts_with("Discuss"));
    }
}
