//! Headless model of the quote form.
//!
//! The controls are the only place selection state lives. Every change
//! event reads them into a [`QuoteSelection`], runs the engine, and writes
//! the result back to the price text and the quote button before
//! returning, so the button can never carry a link for an older selection.

use repaint_core::calculations::QuoteEngine;
use repaint_core::{
    AddOnOption, Catalog, ContactConfig, MotorCategoryOption, QuoteResult, QuoteSelection,
    ServiceOption,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown {kind} '{id}'")]
    UnknownOption { kind: &'static str, id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opacity {
    Full,
    Dimmed,
}

impl Opacity {
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Full => "1",
            Self::Dimmed => "0.5",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Pointer,
    NotAllowed,
}

impl Cursor {
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Pointer => "pointer",
            Self::NotAllowed => "not-allowed",
        }
    }
}

/// The "get quote" button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteActionControl {
    pub disabled: bool,
    pub opacity: Opacity,
    pub cursor: Cursor,
    pub href: Option<String>,
    pub target: Option<&'static str>,
}

impl Default for QuoteActionControl {
    fn default() -> Self {
        Self {
            disabled: true,
            opacity: Opacity::Dimmed,
            cursor: Cursor::NotAllowed,
            href: None,
            target: None,
        }
    }
}

impl QuoteActionControl {
    /// Mirrors `result` onto the button. The link is replaced, never merged.
    pub fn apply(
        &mut self,
        result: &QuoteResult,
    ) {
        match &result.link {
            Some(link) if result.is_valid => {
                self.disabled = false;
                self.opacity = Opacity::Full;
                self.cursor = Cursor::Pointer;
                self.href = Some(link.clone());
                self.target = Some("_blank");
            }
            _ => *self = Self::default(),
        }
    }

    /// What clicking the button opens, if anything.
    pub fn activate(&self) -> Option<&str> {
        if self.disabled {
            None
        } else {
            self.href.as_deref()
        }
    }
}

/// A drop-down whose `None` selection is the placeholder entry.
#[derive(Debug, Clone)]
pub struct SelectControl<T> {
    options: Vec<T>,
    selected: Option<usize>,
}

impl<T> SelectControl<T> {
    pub fn new(options: Vec<T>) -> Self {
        Self {
            options,
            selected: None,
        }
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.and_then(|idx| self.options.get(idx))
    }

    fn select(
        &mut self,
        index: Option<usize>,
    ) {
        self.selected = index;
    }
}

#[derive(Debug, Clone)]
pub struct CheckboxControl {
    pub option: AddOnOption,
    pub checked: bool,
}

/// The calculator section of the page.
#[derive(Debug, Clone)]
pub struct QuoteForm {
    contact: ContactConfig,
    services: SelectControl<ServiceOption>,
    motors: SelectControl<MotorCategoryOption>,
    add_ons: Vec<CheckboxControl>,
    price_text: String,
    action: QuoteActionControl,
    result: QuoteResult,
}

impl QuoteForm {
    /// Builds the form with nothing selected and runs the initial
    /// calculation, exactly as a fresh page load does.
    pub fn new(
        catalog: Catalog,
        contact: ContactConfig,
    ) -> Self {
        let result = QuoteResult::invalid();
        let mut form = Self {
            contact,
            services: SelectControl::new(catalog.services),
            motors: SelectControl::new(catalog.motor_categories),
            add_ons: catalog
                .add_ons
                .into_iter()
                .map(|option| CheckboxControl {
                    option,
                    checked: false,
                })
                .collect(),
            price_text: result.display_price.clone(),
            action: QuoteActionControl::default(),
            result,
        };
        form.refresh();
        form
    }

    /// Change event of the service drop-down. `None` picks the placeholder.
    pub fn select_service(
        &mut self,
        id: Option<&str>,
    ) -> Result<(), FormError> {
        let index = find_index("service", self.services.options(), id, |s| &s.id)?;
        self.services.select(index);
        debug!(service = ?id, "service changed");
        self.refresh();
        Ok(())
    }

    /// Change event of the motor drop-down. `None` picks the placeholder.
    pub fn select_motor(
        &mut self,
        id: Option<&str>,
    ) -> Result<(), FormError> {
        let index = find_index("motor category", self.motors.options(), id, |m| &m.id)?;
        self.motors.select(index);
        debug!(motor = ?id, "motor category changed");
        self.refresh();
        Ok(())
    }

    /// Change event of an add-on checkbox.
    pub fn set_add_on(
        &mut self,
        id: &str,
        checked: bool,
    ) -> Result<(), FormError> {
        let checkbox = self
            .add_ons
            .iter_mut()
            .find(|c| c.option.id == id)
            .ok_or_else(|| FormError::UnknownOption {
                kind: "add-on",
                id: id.to_string(),
            })?;
        checkbox.checked = checked;
        debug!(add_on = id, checked, "add-on changed");
        self.refresh();
        Ok(())
    }

    /// Puts every control back to its initial state.
    pub fn reset(&mut self) {
        self.services.select(None);
        self.motors.select(None);
        for checkbox in &mut self.add_ons {
            checkbox.checked = false;
        }
        self.refresh();
    }

    /// Reads the current control values.
    pub fn selection(&self) -> QuoteSelection {
        let mut selection = QuoteSelection::empty();
        selection.service = self.services.selected().cloned();
        selection.motor = self.motors.selected().cloned();
        for checkbox in self.add_ons.iter().filter(|c| c.checked) {
            selection.set_add_on(checkbox.option.clone(), true);
        }
        selection
    }

    pub fn price_text(&self) -> &str {
        &self.price_text
    }

    pub fn action(&self) -> &QuoteActionControl {
        &self.action
    }

    pub fn result(&self) -> &QuoteResult {
        &self.result
    }

    pub fn services(&self) -> &SelectControl<ServiceOption> {
        &self.services
    }

    pub fn motors(&self) -> &SelectControl<MotorCategoryOption> {
        &self.motors
    }

    pub fn add_ons(&self) -> &[CheckboxControl] {
        &self.add_ons
    }

    fn refresh(&mut self) {
        let selection = self.selection();
        let result = QuoteEngine::new(&self.contact).recompute(&selection);

        self.price_text = result.display_price.clone();
        self.action.apply(&result);
        self.result = result;
    }
}

fn find_index<T>(
    kind: &'static str,
    options: &[T],
    id: Option<&str>,
    id_of: impl Fn(&T) -> &String,
) -> Result<Option<usize>, FormError> {
    let Some(id) = id else {
        return Ok(None);
    };
    options
        .iter()
        .position(|o| id_of(o) == id)
        .map(Some)
        .ok_or_else(|| FormError::UnknownOption {
            kind,
            id: id.to_string(),
        })
}
