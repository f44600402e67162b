//! Client for the remote code-execution service.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::error::ClientError;

pub const DEFAULT_EXECUTION_URL: &str = "https://code-syncc-backend.onrender.com";

/// Languages accepted by the execution service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    C,
    Cpp,
    JavaScript,
    Python,
    Java,
    Go,
    CSharp,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::C,
        Language::Cpp,
        Language::JavaScript,
        Language::Python,
        Language::Java,
        Language::Go,
        Language::CSharp,
    ];

    /// Code sent in the `language` form field
    pub fn code(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::JavaScript => "js",
            Language::Python => "py",
            Language::Java => "java",
            Language::Go => "go",
            Language::CSharp => "cs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cpp => "C++",
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Go => "GoLang",
            Language::CSharp => "C#",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|language| language.code() == code)
            .ok_or_else(|| {
                let known: Vec<&str> = Language::ALL.iter().map(Language::code).collect();
                format!("unknown language '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Body returned by the execution service
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExecutionResponse {
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub error: String,
}

impl ExecutionResponse {
    /// `error + output` when an error is reported, otherwise `output`
    pub fn display_output(&self) -> String {
        if self.error.is_empty() {
            self.output.clone()
        } else {
            format!("{}{}", self.error, self.output)
        }
    }
}

pub struct RemoteExecutor {
    http: reqwest::Client,
    url: String,
}

impl RemoteExecutor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Run `code` remotely and return the text to display
    pub async fn execute(
        &self,
        code: &str,
        language: Language,
        input: &str,
    ) -> Result<String, ClientError> {
        tracing::debug!("Executing {} bytes of {} at {}", code.len(), language, self.url);

        let response = self
            .http
            .post(&self.url)
            .form(&[("code", code), ("language", language.code()), ("input", input)])
            .send()
            .await
            .map_err(|e| ClientError::ExecutionError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::ExecutionError(e.to_string()))?;
        if !status.is_success() {
            return Err(ClientError::ExecutionError(format!(
                "service responded with {}",
                status
            )));
        }

        let parsed: ExecutionResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::ExecutionError(format!("malformed response: {}", e)))?;
        Ok(parsed.display_output())
    }
}
