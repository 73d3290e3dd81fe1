/// A one-shot effect budget.
///
/// Revives, shield bursts and armed dodges each fire at most once per
/// arming. The only transitions are `Unavailable → Armed` (via [`arm`]) and
/// `Armed → Spent` (via [`consume`]); consuming anything but an armed charge
/// is a no-op, which makes "fires at most once" a property of the type.
///
/// [`arm`]: Charge::arm
/// [`consume`]: Charge::consume
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Charge {
    /// The source does not exist for this combatant.
    #[default]
    Unavailable,
    Armed,
    Spent,
}

impl Charge {
    /// `Armed` when `available`, otherwise `Unavailable`.
    pub fn armed_if(available: bool) -> Self {
        if available {
            Charge::Armed
        } else {
            Charge::Unavailable
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, Charge::Armed)
    }

    pub fn is_spent(&self) -> bool {
        matches!(self, Charge::Spent)
    }

    /// Re-arm a reusable charge (dodge stance). Never resurrects a spent
    /// revive because revive charges are only built through [`armed_if`].
    ///
    /// [`armed_if`]: Charge::armed_if
    pub fn arm(&mut self) {
        *self = Charge::Armed;
    }

    /// Spend the charge. Returns `true` only on the `Armed → Spent` transition.
    pub fn consume(&mut self) -> bool {
        if self.is_armed() {
            *self = Charge::Spent;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_fires_once() {
        let mut charge = Charge::armed_if(true);
        assert!(charge.consume());
        assert!(!charge.consume());
        assert!(charge.is_spent());
    }

    #[test]
    fn unavailable_never_fires() {
        let mut charge = Charge::armed_if(false);
        assert!(!charge.consume());
        assert_eq!(charge, Charge::Unavailable);
    }
}
