use std::str::FromStr;

/// Shape of the result handed back to the caller.
///
/// `Structured` and `Json` are both decoded from the service's JSON
/// envelope; they only differ in how the merged records are returned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Ordered list of record maps.
    #[default]
    Structured,
    /// JSON array of record objects, as text.
    Json,
    /// Header line plus comma separated rows, as text.
    Csv,
}

impl ResponseFormat {
    /// Path segment selecting the payload encoding on the service.
    pub fn segment(&self) -> &'static str {
        match self {
            ResponseFormat::Structured | ResponseFormat::Json => "json",
            ResponseFormat::Csv => "csv",
        }
    }
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ResponseFormat::Structured => "structured",
                ResponseFormat::Json => "json",
                ResponseFormat::Csv => "csv",
            }
        )?;
        Ok(())
    }
}

impl FromStr for ResponseFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "structured" | "py" => Ok(ResponseFormat::Structured),
            "json" => Ok(ResponseFormat::Json),
            "csv" => Ok(ResponseFormat::Csv),
            _ => Err(()),
        }
    }
}
