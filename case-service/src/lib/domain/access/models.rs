use std::fmt;

/// Resource types guarded by the access scoper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    LegalCase,
    File,
    Invoice,
    Agenda,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::LegalCase => "Legal case",
            ResourceKind::File => "File",
            ResourceKind::Invoice => "Invoice",
            ResourceKind::Agenda => "Agenda event",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row whose visibility depends on the principal's membership edges.
pub trait ScopedResource: Send + Sync + 'static {
    /// How the resource is addressed in requests.
    type Id: Copy + fmt::Debug + fmt::Display + Send + Sync + 'static;

    const KIND: ResourceKind;
}
