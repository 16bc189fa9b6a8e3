//! Encapsulated stylesheet of the button

use crate::kit::theme::Theme;
use crate::style::{StyleError, Stylesheet};

const BUTTON_CSS: &str = r#"
.button {
  display: inline-flex;
  align-items: center;
  justify-content: center;
  gap: 0.5rem;
  font-family: inherit;
  font-weight: 500;
  text-decoration: none;
  border: none;
  border-radius: var(--border-radius);
  cursor: pointer;
  transition: var(--transition);
  outline: none;
  position: relative;
  overflow: hidden;
}

.button:focus-visible {
  outline: 2px solid var(--primary-color);
  outline-offset: 2px;
}

/* Variants */
.button--primary {
  background-color: var(--primary-color);
  color: var(--text-color);
}

.button--primary:hover:not(:disabled) {
  background-color: var(--primary-hover);
}

.button--secondary {
  background-color: var(--secondary-color);
  color: var(--text-color);
}

.button--secondary:hover:not(:disabled) {
  background-color: var(--secondary-hover);
}

.button--danger {
  background-color: var(--danger-color);
  color: var(--text-color);
}

.button--danger:hover:not(:disabled) {
  background-color: var(--danger-hover);
}

/* Sizes */
.button--small {
  padding: 0.5rem 1rem;
  font-size: 0.875rem;
}

.button--medium {
  padding: 0.75rem 1.5rem;
  font-size: 1rem;
}

.button--large {
  padding: 1rem 2rem;
  font-size: 1.125rem;
}

/* States */
.button:disabled {
  background-color: var(--disabled-color);
  color: #9ca3af;
  cursor: not-allowed;
}

.button--loading {
  cursor: not-allowed;
}

.spinner {
  width: 1rem;
  height: 1rem;
  border: 2px solid transparent;
  border-top: 2px solid currentColor;
  border-radius: 50%;
  animation: spin 1s linear infinite;
}

@keyframes spin {
  to {
    transform: rotate(360deg);
  }
}

.ripple {
  position: absolute;
  border-radius: 50%;
  background-color: rgba(255, 255, 255, 0.3);
  pointer-events: none;
  transform: scale(0);
  animation: ripple 0.6s linear;
}

@keyframes ripple {
  to {
    transform: scale(4);
    opacity: 0;
  }
}
"#;

/// Build the button's stylesheet with `theme` applied to the `:host` rule
pub fn button_stylesheet(theme: &Theme) -> Result<Stylesheet, StyleError> {
    let mut stylesheet = Stylesheet::parse(BUTTON_CSS)?;
    stylesheet.prepend_rule(":host", theme.host_properties());
    Ok(stylesheet)
}
