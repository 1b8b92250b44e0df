use codenova_common::types::{TestCase, TestCaseField};

/// Ordered test cases being edited. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseStore {
    cases: Vec<TestCase>,
}

impl Default for TestCaseStore {
    fn default() -> Self {
        Self {
            cases: vec![TestCase::default()],
        }
    }
}

impl TestCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing cases; an empty list yields one blank case
    pub fn from_cases(cases: Vec<TestCase>) -> Self {
        let mut store = Self::default();
        store.replace_all(cases);
        store
    }

    /// Append a blank case
    pub fn add(&mut self) {
        self.cases.push(TestCase::default());
    }

    /// Remove the case at `index`.
    ///
    /// The last remaining case is never removed; the call is ignored and
    /// `false` returned. Out-of-range indexes are ignored as well.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.cases.len() <= 1 || index >= self.cases.len() {
            return false;
        }
        self.cases.remove(index);
        true
    }

    pub fn update(&mut self, index: usize, field: TestCaseField, value: impl Into<String>) {
        let Some(case) = self.cases.get_mut(index) else {
            return;
        };
        match field {
            TestCaseField::Input => case.input = value.into(),
            TestCaseField::ExpectedOutput => case.expected_output = value.into(),
        }
    }

    pub fn replace_all(&mut self, cases: Vec<TestCase>) {
        self.cases = if cases.is_empty() {
            vec![TestCase::default()]
        } else {
            cases
        };
    }

    /// Index of the first case missing input or expected output
    pub fn first_incomplete(&self) -> Option<usize> {
        self.cases.iter().position(|case| !case.is_complete())
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TestCase> {
        self.cases.get(index)
    }

    pub fn as_slice(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn to_vec(&self) -> Vec<TestCase> {
        self.cases.clone()
    }
}
