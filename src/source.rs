use std::collections::{BTreeMap, HashMap};

/// Where a parse reads raw values from
///
/// A missing key and an empty value are treated the same by the registry.
pub trait Source {
    fn lookup(&self, name: &str) -> Option<String>;
}

/// The process environment
///
/// Values that are not valid unicode are read lossily, so they still reach
/// conversion and are echoed in failures instead of looking unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Source for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }
}

impl Source for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Source for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<S: Source + ?Sized> Source for &S {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}
