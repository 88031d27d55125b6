use crate::catalog::Fighter;
use crate::picker::FighterSelector;
use crate::slug::normalize;

pub const EMPTY_DIVISION_MESSAGE: &str = "No fighters found for this division.";

#[derive(Debug, Clone)]
pub enum DivisionBody {
    Picker(FighterSelector),
    Empty,
}

#[derive(Debug, Clone)]
pub struct DivisionPage {
    pub param: String,
    pub title: String,
    pub body: DivisionBody,
}

impl DivisionPage {
    pub fn open(catalog: &[Fighter], param: &str) -> Self {
        let body = match FighterSelector::new(filter_division(catalog, param)) {
            Some(picker) => DivisionBody::Picker(picker),
            None => DivisionBody::Empty,
        };
        Self {
            param: param.to_string(),
            title: page_title(param),
            body,
        }
    }

    pub fn picker(&self) -> Option<&FighterSelector> {
        match &self.body {
            DivisionBody::Picker(picker) => Some(picker),
            DivisionBody::Empty => None,
        }
    }

    pub fn picker_mut(&mut self) -> Option<&mut FighterSelector> {
        match &mut self.body {
            DivisionBody::Picker(picker) => Some(picker),
            DivisionBody::Empty => None,
        }
    }
}

/// Fighters whose division matches `param` ignoring case and punctuation.
pub fn filter_division(catalog: &[Fighter], param: &str) -> Vec<Fighter> {
    let key = normalize(param);
    catalog
        .iter()
        .filter(|f| normalize(&f.division) == key)
        .cloned()
        .collect()
}

fn page_title(param: &str) -> String {
    let mut chars = param.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
