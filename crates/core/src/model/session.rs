use crate::coverage::CoverageState;

/// The row currently drawn for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    index: usize,
    visible: bool,
}

impl Selection {
    #[must_use]
    pub fn shown(index: usize) -> Self {
        Self {
            index,
            visible: true,
        }
    }

    #[must_use]
    pub fn hidden(index: usize) -> Self {
        Self {
            index,
            visible: false,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Everything one session remembers between interactions.
///
/// A fresh state has no selection and zero coverage. Counters refer to the
/// table identified by `table_fingerprint`; binding a different table starts
/// them over so seen indices always fit the current table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    table_fingerprint: Option<String>,
    selection: Option<Selection>,
    coverage: CoverageState,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn table_fingerprint(&self) -> Option<&str> {
        self.table_fingerprint.as_deref()
    }

    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Index of the selection if it is currently shown.
    #[must_use]
    pub fn visible_index(&self) -> Option<usize> {
        self.selection
            .filter(Selection::is_visible)
            .map(|selection| selection.index())
    }

    #[must_use]
    pub fn coverage(&self) -> &CoverageState {
        &self.coverage
    }

    /// Point the session at a table. Returns `true` if the state was reset
    /// because it previously referred to a different table.
    pub fn bind_table(&mut self, fingerprint: &str) -> bool {
        match self.table_fingerprint.as_deref() {
            Some(current) if current == fingerprint => false,
            None => {
                self.table_fingerprint = Some(fingerprint.to_owned());
                false
            }
            Some(_) => {
                *self = Self {
                    table_fingerprint: Some(fingerprint.to_owned()),
                    ..Self::default()
                };
                true
            }
        }
    }

    /// Show row `index` and count it. This is the only place coverage is
    /// updated, once per draw. Returns `true` if the row was new.
    pub fn select(&mut self, index: usize) -> bool {
        let selection = Selection::shown(index);
        self.selection = Some(selection);
        self.coverage.update(&selection)
    }
}
