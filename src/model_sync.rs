//! Syncing computed rows into Slint models.

use slint::{Model, VecModel};
use std::rc::Rc;

/// Internal trait for auto-syncing to Slint models.
pub(crate) trait ModelSyncer<T> {
    fn sync(&self, items: &[T]);
}

/// Concrete implementation of ModelSyncer for a specific row type.
pub(crate) struct ConcreteModelSyncer<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
}

impl<P, F> ConcreteModelSyncer<P, F> {
    pub(crate) fn new(model: Rc<VecModel<P>>, constructor: F) -> Self {
        Self { model, constructor }
    }
}

impl<T, P, F> ModelSyncer<T> for ConcreteModelSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(&T) -> P,
{
    fn sync(&self, items: &[T]) {
        // Update existing rows or add new ones
        for (i, item) in items.iter().enumerate() {
            let row = (self.constructor)(item);
            if i < self.model.row_count() {
                self.model.set_row_data(i, row);
            } else {
                self.model.push(row);
            }
        }
        // Remove excess rows
        while self.model.row_count() > items.len() {
            self.model.remove(self.model.row_count() - 1);
        }
    }
}
