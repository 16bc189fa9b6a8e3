// OrbitKit widget library

pub mod components;
pub mod theme;

/// Re-export of common widgets for convenience
pub mod prelude {
    pub use crate::kit::components::button::{
        ActivationDetail, AttributePolicy, ButtonProps, ButtonSize, ButtonVariant, CustomButton,
        BUTTON_CLICK,
    };
    pub use crate::kit::theme::Theme;
}
