use crate::catalog::{Gender, WeightClass, weight_classes};
use crate::slug::route_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightClassCard {
    pub name: &'static str,
    pub image_ref: &'static str,
    pub link: String,
}

#[derive(Debug, Clone)]
pub struct WeightClassSelector {
    pub gender: Gender,
    pub cursor: usize,
}

impl Default for WeightClassSelector {
    fn default() -> Self {
        Self::new(Gender::Male)
    }
}

impl WeightClassSelector {
    pub fn new(initial_gender: Gender) -> Self {
        Self {
            gender: initial_gender,
            cursor: 0,
        }
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.gender = gender;
        self.clamp_cursor();
    }

    pub fn toggle_gender(&mut self) {
        self.set_gender(self.gender.toggled());
    }

    /// Weight classes for the current gender, in catalog order.
    pub fn visible(&self) -> Vec<&'static WeightClass> {
        weight_classes()
            .iter()
            .filter(|w| w.gender == self.gender)
            .collect()
    }

    pub fn cards(&self) -> Vec<WeightClassCard> {
        self.visible()
            .into_iter()
            .map(|w| WeightClassCard {
                name: w.name,
                image_ref: w.image_ref,
                link: route_path(w.name),
            })
            .collect()
    }

    pub fn selected(&self) -> Option<&'static WeightClass> {
        self.visible().get(self.cursor).copied()
    }

    pub fn selected_link(&self) -> Option<String> {
        self.selected().map(|w| route_path(w.name))
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1).min(len - 1);
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }
}
