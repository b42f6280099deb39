//! LDIF rendering of change scripts, in the form `ldapmodify` consumes.

use std::fmt;

use crate::change::{ChangeScript, EntryChange, Modification};

impl fmt::Display for ChangeScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for change in &self.changes {
            write!(f, "{change}")?;
        }
        Ok(())
    }
}

/// Each block ends with exactly one blank line.
impl fmt::Display for EntryChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryChange::Add { dn, attributes } => {
                writeln!(f, "dn: {dn}")?;
                writeln!(f, "changetype: add")?;
                for attr in attributes {
                    for value in &attr.values {
                        writeln!(f, "{}: {value}", attr.name)?;
                    }
                }
            }
            EntryChange::Delete { dn } => {
                writeln!(f, "dn: {dn}")?;
                writeln!(f, "changetype: delete")?;
            }
            EntryChange::Modify { dn, modifications } => {
                writeln!(f, "dn: {dn}")?;
                writeln!(f, "changetype: modify")?;
                for m in modifications {
                    write!(f, "{m}")?;
                }
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-")?;
        writeln!(f, "{}: {}", self.op.keyword(), self.attribute)?;
        writeln!(f, "{}: {}", self.attribute, self.value)
    }
}
