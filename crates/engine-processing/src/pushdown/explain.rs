use std::fmt;

/// What a filter looked like after each stage of compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explain {
    pub parsed: String,
    pub pruned: Option<String>,
    pub rewritten: Option<String>,
    pub filter: Option<String>,
}

impl fmt::Display for Explain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = |value: &Option<String>| value.clone().unwrap_or_else(|| "(none)".into());

        writeln!(f, "parsed:    {}", self.parsed)?;
        writeln!(f, "pruned:    {}", stage(&self.pruned))?;
        writeln!(f, "rewritten: {}", stage(&self.rewritten))?;
        write!(f, "filter:    {}", stage(&self.filter))
    }
}
