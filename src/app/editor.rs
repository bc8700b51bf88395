//! Record list plus entry form, shared by the leaderboard and slideshow
//! editors.

use std::path::Path;

use crate::block::{BlockRecord, DataFile};
use crate::error::{EditResult, ValidationError};
use crate::form::{Form, integer, optional_integer, required};
use crate::records::{Contestant, Slide};
use crate::sidefiles::PriceConfig;

/// A record type that can be edited through a [`Form`].
pub trait FormRecord: BlockRecord {
    const LABELS: &'static [&'static str];

    /// Field values for an existing record, in label order.
    fn form_values(&self) -> Vec<String>;

    /// Build a record from the form; `len` is the current record count.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a field is missing or malformed.
    fn from_form(form: &Form, len: usize) -> Result<Self, ValidationError>;
}

impl FormRecord for Contestant {
    const LABELS: &'static [&'static str] = &["Name", "Hours", "Money", "Profile Pic"];

    fn form_values(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.hours.to_string(),
            self.money.to_string(),
            self.profile_pic.clone(),
        ]
    }

    fn from_form(form: &Form, _len: usize) -> Result<Self, ValidationError> {
        let name = required("Name", form.value(0))?;
        let hours = integer("Hours", form.value(1))?;
        let money = optional_integer("Money", form.value(2))?.unwrap_or(0);
        Ok(Self::new(name, hours, money, form.value(3)))
    }
}

impl FormRecord for Slide {
    const LABELS: &'static [&'static str] = &["Index", "URL", "Title", "Description"];

    fn form_values(&self) -> Vec<String> {
        vec![
            self.index.to_string(),
            self.url.clone(),
            self.title.clone(),
            self.description.clone(),
        ]
    }

    /// A blank index, or one past the end, places the slide last.
    fn from_form(form: &Form, len: usize) -> Result<Self, ValidationError> {
        let index = optional_integer("Index", form.value(0))?.map_or(len, |i: usize| i.min(len));
        Ok(Self::new(index, form.value(1), form.value(2), form.value(3)))
    }
}

pub const PRICE_LABELS: &[&str] = &["Pool Prize", "Prize Per Hour", "Total Hours"];

/// Read the prize constants out of the price form.
///
/// # Errors
///
/// Returns [`ValidationError`] unless all three fields are whole numbers.
pub fn prices_from_form(form: &Form) -> Result<PriceConfig, ValidationError> {
    Ok(PriceConfig {
        pool_price: integer(PRICE_LABELS[0], form.value(0))?,
        price_per_hour: integer(PRICE_LABELS[1], form.value(1))?,
        total_hours: integer(PRICE_LABELS[2], form.value(2))?,
    })
}

/// What a form submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    Added,
    Updated,
}

/// Operations the event loop and renderer need from an editor, whatever
/// its record type.
pub trait EditorPane {
    fn path(&self) -> &Path;
    fn is_dirty(&self) -> bool;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// One display line per record, in order.
    fn item_labels(&self) -> Vec<String>;
    fn selected(&self) -> Option<usize>;
    fn form(&self) -> &Form;
    fn form_mut(&mut self) -> &mut Form;

    fn select_next(&mut self);
    fn select_prev(&mut self);
    /// Drop the selection and empty the form.
    fn clear_selection(&mut self);

    /// Update the selected record from the form, or append a new one when
    /// nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the form is invalid.
    fn submit(&mut self) -> Result<Submitted, ValidationError>;

    /// Append a new record from the form regardless of the selection.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the form is invalid.
    fn add(&mut self) -> Result<(), ValidationError>;

    /// # Errors
    ///
    /// Returns [`ValidationError::NoSelection`] when nothing is selected.
    fn delete_selected(&mut self) -> Result<(), ValidationError>;

    /// # Errors
    ///
    /// Returns [`ValidationError::NoSelection`] when nothing is selected.
    fn move_selected(&mut self, up: bool) -> Result<(), ValidationError>;

    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&mut self) -> EditResult<()>;

    /// Discard edits and read the file again.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    fn reload(&mut self) -> EditResult<()>;
}

#[derive(Debug, Clone)]
pub struct RecordEditor<R> {
    file: DataFile<R>,
    selected: Option<usize>,
    form: Form,
}

impl<R: FormRecord> RecordEditor<R> {
    pub fn new(file: DataFile<R>) -> Self {
        Self {
            file,
            selected: None,
            form: Form::new(R::LABELS),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn open(path: &Path) -> EditResult<Self> {
        DataFile::load(path).map(Self::new)
    }

    pub fn records(&self) -> &[R] {
        self.file.records().as_slice()
    }

    /// Select record `index` and copy it into the form.
    pub fn select(&mut self, index: usize) {
        let Some(record) = self.file.records().get(index) else {
            return;
        };
        let values = record.form_values();
        self.form.set_values(&values);
        self.selected = Some(index);
    }
}

impl<R: FormRecord> EditorPane for RecordEditor<R> {
    fn path(&self) -> &Path {
        self.file.path()
    }

    fn is_dirty(&self) -> bool {
        self.file.is_dirty()
    }

    fn len(&self) -> usize {
        self.file.records().len()
    }

    fn item_labels(&self) -> Vec<String> {
        self.file.records().iter().map(BlockRecord::label).collect()
    }

    fn selected(&self) -> Option<usize> {
        self.selected
    }

    fn form(&self) -> &Form {
        &self.form
    }

    fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    fn select_next(&mut self) {
        let next = self.selected.map_or(0, |i| i + 1);
        if next < self.len() {
            self.select(next);
        }
    }

    fn select_prev(&mut self) {
        match self.selected {
            Some(i) if i > 0 => self.select(i - 1),
            None if !self.is_empty() => self.select(self.len() - 1),
            _ => {}
        }
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.form.clear();
    }

    fn submit(&mut self) -> Result<Submitted, ValidationError> {
        let record = R::from_form(&self.form, self.len())?;
        let outcome = if let Some(index) = self.selected {
            self.file.records_mut().replace(index, record)?;
            Submitted::Updated
        } else {
            self.file.records_mut().append(record);
            Submitted::Added
        };
        self.clear_selection();
        Ok(outcome)
    }

    fn add(&mut self) -> Result<(), ValidationError> {
        let record = R::from_form(&self.form, self.len())?;
        self.file.records_mut().append(record);
        self.clear_selection();
        Ok(())
    }

    fn delete_selected(&mut self) -> Result<(), ValidationError> {
        let index = self.selected.ok_or(ValidationError::NoSelection)?;
        self.file.records_mut().remove(index)?;
        self.clear_selection();
        Ok(())
    }

    fn move_selected(&mut self, up: bool) -> Result<(), ValidationError> {
        let index = self.selected.ok_or(ValidationError::NoSelection)?;
        let records = self.file.records_mut();
        let moved_to = if up {
            records.move_up(index)?
        } else {
            records.move_down(index)?
        };
        self.select(moved_to);
        Ok(())
    }

    fn save(&mut self) -> EditResult<()> {
        self.file.save()
    }

    fn reload(&mut self) -> EditResult<()> {
        self.file = DataFile::load(self.file.path())?;
        self.clear_selection();
        Ok(())
    }
}
