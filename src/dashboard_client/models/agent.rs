use serde::{Deserialize, Serialize};

/// Agent presence as reported by the PBX; unrecognised labels are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgentStatus {
    Available,
    OnCall,
    Away,
    Busy,
    Unknown(String),
}

impl From<String> for AgentStatus {
    fn from(value: String) -> Self {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "available" => AgentStatus::Available,
            "on call" | "oncall" => AgentStatus::OnCall,
            "away" => AgentStatus::Away,
            "busy" => AgentStatus::Busy,
            _ => AgentStatus::Unknown(value),
        }
    }
}

impl From<AgentStatus> for String {
    fn from(value: AgentStatus) -> Self {
        match value {
            AgentStatus::Available => "Available".to_string(),
            AgentStatus::OnCall => "On Call".to_string(),
            AgentStatus::Away => "Away".to_string(),
            AgentStatus::Busy => "Busy".to_string(),
            AgentStatus::Unknown(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentCall {
    pub caller_number: String,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub start_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    pub extension: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    pub status: AgentStatus,
    #[serde(default, alias = "is_logged_in", skip_serializing_if = "Option::is_none")]
    pub logged_in: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_call: Option<CurrentCall>,
}

impl Agent {
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let trimmed = name.trim();
        if trimmed.is_empty() {
            self.extension.clone()
        } else {
            trimmed.to_string()
        }
    }

    pub fn initials(&self) -> String {
        [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn is_on_call(&self) -> bool {
        self.current_call.is_some() || self.status == AgentStatus::OnCall
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_parses_known_labels_and_keeps_unknown_ones() {
        assert_eq!(AgentStatus::from("On Call".to_string()), AgentStatus::OnCall);
        assert_eq!(AgentStatus::from("on_call".to_string()), AgentStatus::OnCall);
        assert_eq!(AgentStatus::from("AVAILABLE".to_string()), AgentStatus::Available);
        assert_eq!(
            AgentStatus::from("Lunch".to_string()),
            AgentStatus::Unknown("Lunch".to_string())
        );
    }

    #[test]
    fn agent_decodes_with_optional_fields() {
        let agent: Agent = serde_json::from_value(json!({
            "extension": "1001",
            "first_name": "ayşe",
            "last_name": "Yılmaz",
            "status": "On Call",
            "current_call": { "caller_number": "+905551112233", "duration": 75, "start_time": "2024-05-01T09:00:00Z" }
        }))
        .unwrap();

        assert_eq!(agent.status, AgentStatus::OnCall);
        assert_eq!(agent.full_name(), "ayşe Yılmaz");
        assert_eq!(agent.initials(), "AY");
        assert!(agent.is_on_call());
        assert_eq!(agent.logged_in, None);
    }

    #[test]
    fn nameless_agent_falls_back_to_extension() {
        let agent: Agent =
            serde_json::from_value(json!({ "extension": "2002", "status": "Away" })).unwrap();
        assert_eq!(agent.full_name(), "2002");
        assert_eq!(agent.initials(), "");
    }
}
