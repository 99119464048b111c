/// Events emitted by a [`Locator`](crate::Locator) during operations.
///
/// Every event is logged through `tracing` and passed to the callback set via
/// `set_trace_callback`. The `Clone` derive allows callbacks to store or forward
/// events if needed.
///
/// # Examples
///
/// ```rust
/// use service_locator::LocatorEvent;
///
/// let event = LocatorEvent::Register { type_name: "i32" };
/// assert_eq!(event.to_string(), "register { type_name: i32 }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorEvent {
    /// An instance was registered.
    Register {
        /// The type name of the registered value (e.g., "i32", "alloc::string::String")
        type_name: &'static str,
    },

    /// An async factory was registered.
    RegisterAsync { type_name: &'static str },

    /// An instance was requested synchronously (`get`, `maybe_get`).
    Get {
        type_name: &'static str,
        /// Whether an instance was present
        found: bool,
    },

    /// An instance was requested asynchronously (`get_async`, `maybe_get_async`).
    GetAsync {
        type_name: &'static str,
        /// Whether an instance or a factory was present
        found: bool,
    },

    /// An async factory finished running.
    Resolve {
        type_name: &'static str,
        /// `false` when the factory returned an error
        success: bool,
    },

    /// A registration check was performed.
    Contains { type_name: &'static str, found: bool },

    /// An instance and its factory were removed.
    Unregister { type_name: &'static str },

    /// The locator was cleared.
    Clear {},
}

impl LocatorEvent {
    /// Type the event is about; `None` for [`LocatorEvent::Clear`].
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            LocatorEvent::Register { type_name }
            | LocatorEvent::RegisterAsync { type_name }
            | LocatorEvent::Get { type_name, .. }
            | LocatorEvent::GetAsync { type_name, .. }
            | LocatorEvent::Resolve { type_name, .. }
            | LocatorEvent::Contains { type_name, .. }
            | LocatorEvent::Unregister { type_name } => Some(type_name),
            LocatorEvent::Clear {} => None,
        }
    }
}

impl std::fmt::Display for LocatorEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocatorEvent::Register { type_name } => {
                write!(f, "register {{ type_name: {type_name} }}")
            }
            LocatorEvent::RegisterAsync { type_name } => {
                write!(f, "register_async {{ type_name: {type_name} }}")
            }
            LocatorEvent::Get { type_name, found } => {
                write!(f, "get {{ type_name: {type_name}, found: {found} }}")
            }
            LocatorEvent::GetAsync { type_name, found } => {
                write!(f, "get_async {{ type_name: {type_name}, found: {found} }}")
            }
            LocatorEvent::Resolve { type_name, success } => {
                write!(f, "resolve {{ type_name: {type_name}, success: {success} }}")
            }
            LocatorEvent::Contains { type_name, found } => {
                write!(f, "contains {{ type_name: {type_name}, found: {found} }}")
            }
            LocatorEvent::Unregister { type_name } => {
                write!(f, "unregister {{ type_name: {type_name} }}")
            }
            LocatorEvent::Clear {} => write!(f, "Clearing the Locator"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_event_display() {
        let event = LocatorEvent::Register { type_name: "i32" };
        assert_eq!(event.to_string(), "register { type_name: i32 }");

        let event = LocatorEvent::Get {
            type_name: "String",
            found: true,
        };
        assert_eq!(event.to_string(), "get { type_name: String, found: true }");

        let event = LocatorEvent::Resolve {
            type_name: "Db",
            success: false,
        };
        assert_eq!(event.to_string(), "resolve { type_name: Db, success: false }");

        let event = LocatorEvent::Unregister { type_name: "u8" };
        assert_eq!(event.to_string(), "unregister { type_name: u8 }");

        assert_eq!(LocatorEvent::Clear {}.to_string(), "Clearing the Locator");
    }

    #[test]
    fn test_type_name() {
        let event = LocatorEvent::GetAsync {
            type_name: "u8",
            found: false,
        };
        assert_eq!(event.type_name(), Some("u8"));
        assert_eq!(LocatorEvent::Clear {}.type_name(), None);
    }

    #[test]
    fn test_locator_event_clone() {
        let event = LocatorEvent::RegisterAsync { type_name: "i32" };
        assert_eq!(event.clone(), event);
    }
}
