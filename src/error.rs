use crate::parse::SyntaxError;
use crate::roll::DomainError;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("{label}: {source}")]
    Domain {
        label: String,
        #[source]
        source: DomainError,
    },
}

impl Error {
    pub fn domain(label: impl ToString, source: DomainError) -> Self {
        Self::Domain {
            label: label.to_string(),
            source,
        }
    }
}
