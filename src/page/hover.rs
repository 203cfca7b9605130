/// Direction to play a hover timeline in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverDirection {
    Forward,
    Reverse,
}

/// Pointer notification for a hover target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverEvent {
    Enter,
    Leave,
}

/// Toggle subscription for a pointer-hover timeline (e.g. the header logo).
///
/// Enter plays forward, leave plays in reverse. A second enter without an intervening leave
/// (a handler registered twice, a duplicate platform event) does not fire again.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoverToggle {
    hovered: bool,
}

impl HoverToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn handle(&mut self, event: HoverEvent) -> Option<HoverDirection> {
        match event {
            HoverEvent::Enter => self.pointer_enter(),
            HoverEvent::Leave => self.pointer_leave(),
        }
    }

    pub fn pointer_enter(&mut self) -> Option<HoverDirection> {
        if self.hovered {
            return None;
        }
        self.hovered = true;
        Some(HoverDirection::Forward)
    }

    pub fn pointer_leave(&mut self) -> Option<HoverDirection> {
        if !self.hovered {
            return None;
        }
        self.hovered = false;
        Some(HoverDirection::Reverse)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/hover.rs"]
mod tests;
