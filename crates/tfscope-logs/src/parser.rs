use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use tfscope_types::{LogEntry, LogLevel, Summary};

static REQUEST_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"(?i)tf_req_id[=:"\s]+([^",\s]+)"#,
        r#"(?i)req_id[=:"\s]+([^",\s]+)"#,
        r#"(?i)request_id[=:"\s]+([^",\s]+)"#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid request id pattern"))
    .collect()
});

static RESOURCE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(\*?terraform\.\w+)",
        // aws_instance.web.id
        r"(\w+\.\w+\.\w+)",
        // resource "aws_instance" ...
        r#"resource[ "']+([^"'\s]+)"#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid resource pattern"))
    .collect()
});

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid punctuation pattern"));

/// Phase of a Terraform run a line belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum Section {
    #[default]
    General,
    Plan,
    Apply,
}

impl Section {
    fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Plan => "plan",
            Self::Apply => "apply",
        }
    }
}

/// Result of parsing one uploaded file
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedLog {
    pub logs: Vec<LogEntry>,
    pub summary: Summary,
}

/// Parser for Terraform's JSON log output, with a plain-text fallback
#[derive(Debug, Default)]
pub struct TerraformLogParser {
    section: Section,
    json_lines: usize,
}

impl TerraformLogParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole file; blank lines are skipped but still counted for numbering
    pub fn parse(&mut self, text: &str) -> ParsedLog {
        self.section = Section::General;
        self.json_lines = 0;

        let logs: Vec<LogEntry> = text
            .split('\n')
            .enumerate()
            .filter_map(|(idx, line)| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                if line.trim().is_empty() {
                    None
                } else {
                    Some(self.parse_line(line, idx as u64 + 1))
                }
            })
            .collect();

        let mut summary = summarize(&logs);
        summary.has_json_blocks = self.json_lines > 0;

        tracing::info!(
            entries = logs.len(),
            json_lines = self.json_lines,
            "parsed terraform log"
        );

        ParsedLog { logs, summary }
    }

    /// Parse a single line into a LogEntry
    pub fn parse_line(&mut self, line: &str, line_number: u64) -> LogEntry {
        match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(fields)) => {
                self.json_lines += 1;
                self.parse_json_line(line, line_number, fields)
            }
            _ => self.parse_plain_line(line, line_number),
        }
    }

    fn parse_json_line(&mut self, line: &str, line_number: u64, fields: Map<String, Value>) -> LogEntry {
        let level = match fields.get("@level") {
            Some(Value::String(s)) => LogLevel::from(s.as_str()),
            Some(other) => LogLevel::from(other.to_string()),
            None => LogLevel::Info,
        };
        let message = string_field(&fields, "@message");
        let timestamp = string_field(&fields, "@timestamp");

        self.detect_section(&message);

        let mut entry = LogEntry::new(line_number, level, message.clone()).with_timestamp(timestamp);
        entry.raw_message = Some(line.to_string());
        entry.section = Some(self.section.as_str().to_string());
        entry.request_id = Self::extract_request_id(&fields, &message);
        entry.resource_type = Self::extract_resource_type(&message);
        entry.searchable_text = Some(Self::searchable_text(&fields, &message));
        entry.json_data = Some(Value::Object(fields));
        entry
    }

    fn parse_plain_line(&mut self, line: &str, line_number: u64) -> LogEntry {
        self.detect_section(line);

        let mut entry = LogEntry::new(line_number, LogLevel::Info, line).with_raw_message(line);
        entry.section = Some(self.section.as_str().to_string());
        entry.searchable_text = Some(line.to_lowercase());
        entry.json_data = Some(serde_json::json!({ "raw": line }));
        entry
    }

    /// Switch section on plan/apply markers; otherwise keep the previous one
    fn detect_section(&mut self, message: &str) {
        let lower = message.to_lowercase();
        if ["terraform plan", "running plan", "plan:"]
            .iter()
            .any(|p| lower.contains(p))
        {
            self.section = Section::Plan;
        } else if ["terraform apply", "running apply", "apply:"]
            .iter()
            .any(|p| lower.contains(p))
        {
            self.section = Section::Apply;
        }
    }

    /// First keyed request id in line order, else the first message pattern hit
    fn extract_request_id(fields: &Map<String, Value>, message: &str) -> Option<String> {
        let from_field = fields.iter().find_map(|(key, value)| {
            let key = key.to_lowercase();
            if !(key.contains("req_id") || key.contains("request_id")) {
                return None;
            }
            match value {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            }
        });
        if from_field.is_some() {
            return from_field;
        }

        REQUEST_ID_PATTERNS
            .iter()
            .find_map(|re| re.captures(message))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn extract_resource_type(message: &str) -> Option<String> {
        RESOURCE_PATTERNS
            .iter()
            .find_map(|re| re.captures(message))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// String and number values of the line plus the message stripped of punctuation
    fn searchable_text(fields: &Map<String, Value>, message: &str) -> String {
        let mut parts: Vec<String> = fields
            .values()
            .filter_map(|value| match value {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect();

        parts.push(PUNCTUATION.replace_all(message, " ").into_owned());

        parts.join(" ").to_lowercase()
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Build the per-upload summary from parsed entries
pub fn summarize(logs: &[LogEntry]) -> Summary {
    let mut level_counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut section_counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut requests: HashSet<&str> = HashSet::new();

    for entry in logs {
        *level_counts.entry(entry.level.as_str().to_string()).or_default() += 1;
        let section = entry.section.as_deref().unwrap_or("general");
        *section_counts.entry(section.to_string()).or_default() += 1;
        if let Some(id) = entry.request_id.as_deref().filter(|id| !id.is_empty()) {
            requests.insert(id);
        }
    }

    let count = |level: LogLevel| level_counts.get(level.as_str()).copied().unwrap_or(0);

    Summary {
        total_lines: logs.len() as u64,
        error_count: count(LogLevel::Error),
        warning_count: count(LogLevel::Warning),
        unique_requests: requests.len() as u64,
        level_counts: level_counts.clone(),
        section_counts,
        has_json_blocks: false,
        log_id: None,
    }
}
