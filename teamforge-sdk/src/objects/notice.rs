//! Per-participant team assignment notice.

use serde::{Deserialize, Serialize};

/// Everything a notification sender needs to tell one participant about
/// their team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAssignmentNotice {
    pub recipient_address: String,
    pub recipient_name: String,
    pub hackathon_title: String,
    pub team_name: String,
    pub problem_statement: String,
    /// Names of the other members of the recipient's team.
    pub teammate_names: Vec<String>,
}

impl TeamAssignmentNotice {
    pub fn subject(&self) -> String {
        format!(
            "{}: you have been placed in {}",
            self.hackathon_title, self.team_name
        )
    }

    /// Plain-text body of the notice.
    pub fn body(&self) -> String {
        let teammates = if self.teammate_names.is_empty() {
            "You are the only member of this team.".to_string()
        } else {
            format!("Your teammates: {}.", self.teammate_names.join(", "))
        };
        format!(
            "Hi {name},\n\n\
             Registration for {hackathon} has closed and teams have been formed.\n\n\
             Team: {team}\n\
             Problem statement: {problem}\n\
             {teammates}\n\n\
             Good luck!\n",
            name = self.recipient_name,
            hackathon = self.hackathon_title,
            team = self.team_name,
            problem = self.problem_statement,
        )
    }
}
