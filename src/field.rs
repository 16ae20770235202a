use crate::{error::InvalidValue, kind::EnvValue, kind::Kind};
use std::{cell::RefCell, fmt, rc::Rc};

/// Handle to the destination of a declared variable
///
/// Returned by the declaration methods on [`Registry`](crate::Registry) before
/// anything has been read. The value stays `None` until a parse has written
/// it, so an unparsed destination can never be mistaken for a parsed zero.
/// Clones share the same destination.
pub struct Setting<T> {
    name: &'static str,
    cell: Rc<RefCell<Option<T>>>,
}

impl<T> Setting<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: Rc::new(RefCell::new(None)),
        }
    }

    /// Environment variable key this setting was declared with
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether a parse has written a value
    pub fn is_set(&self) -> bool {
        self.cell.borrow().is_some()
    }

    pub(crate) fn set(&self, value: T) {
        *self.cell.borrow_mut() = Some(value);
    }
}

impl<T: Clone> Setting<T> {
    /// Current value, `None` before a successful parse of this variable
    pub fn get(&self) -> Option<T> {
        self.cell.borrow().clone()
    }

    pub fn get_or(&self, fallback: T) -> T {
        self.get().unwrap_or(fallback)
    }

    pub fn get_or_default(&self) -> T
    where
        T: Default,
    {
        self.get().unwrap_or_default()
    }
}

impl<T> Clone for Setting<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Setting<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting")
            .field("name", &self.name)
            .field("value", &*self.cell.borrow())
            .finish()
    }
}

/// Type-erased destination plus default, one per declared item
pub(crate) trait Slot {
    fn kind(&self) -> Kind;

    /// Copy the typed default into the destination, no conversion involved
    fn apply_default(&self);

    /// Convert `raw` and write it, leaving the destination untouched on failure
    fn convert_into(&self, raw: &str) -> Result<(), InvalidValue>;

    /// Rendered default, `None` when it is the type's zero value
    fn default_text(&self) -> Option<String>;
}

pub(crate) struct Entry<T: EnvValue> {
    default: T,
    setting: Setting<T>,
}

impl<T: EnvValue> Entry<T> {
    pub(crate) fn new(default: T, setting: Setting<T>) -> Self {
        Self { default, setting }
    }
}

impl<T: EnvValue> Slot for Entry<T> {
    fn kind(&self) -> Kind {
        T::KIND
    }

    fn apply_default(&self) {
        self.setting.set(self.default.clone());
    }

    fn convert_into(&self, raw: &str) -> Result<(), InvalidValue> {
        let value = T::convert(raw)?;
        self.setting.set(value);
        Ok(())
    }

    fn default_text(&self) -> Option<String> {
        if self.default.is_zero() {
            None
        } else {
            Some(self.default.render())
        }
    }
}
