/// Process-wide page state. The only transition is `Loading -> Loaded`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageLifecycle {
    #[default]
    Loading,
    Loaded,
}

impl PageLifecycle {
    /// Returns `true` only for the call that performs the transition.
    pub fn mark_loaded(&mut self) -> bool {
        match self {
            Self::Loading => {
                *self = Self::Loaded;
                true
            }
            Self::Loaded => false,
        }
    }

    pub fn is_loaded(self) -> bool {
        self == Self::Loaded
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/lifecycle.rs"]
mod tests;
