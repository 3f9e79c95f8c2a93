//! Header alias resolution.
//!
//! Roster files come from different spreadsheet templates, so each field
//! is recognised under several header spellings. Aliases are listed in
//! priority order and matched exactly against the trimmed header.

/// A student field read from an import row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportField {
    Id,
    Name,
    Group,
    Weight,
}

impl ImportField {
    /// Header spellings for this field, highest priority first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            ImportField::Id => &["ID", "学号", "id"],
            ImportField::Name => &["Name", "姓名", "name"],
            ImportField::Group => &["Group", "班级", "分组", "group"],
            ImportField::Weight => &["Weight", "权重", "weight"],
        }
    }
}

/// Column indices for each field, one entry per alias present in the header.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    id: Vec<usize>,
    name: Vec<usize>,
    group: Vec<usize>,
    weight: Vec<usize>,
}

impl ColumnMap {
    pub fn from_headers(headers: &[String]) -> Self {
        Self {
            id: resolve(headers, ImportField::Id),
            name: resolve(headers, ImportField::Name),
            group: resolve(headers, ImportField::Group),
            weight: resolve(headers, ImportField::Weight),
        }
    }

    pub fn columns(&self, field: ImportField) -> &[usize] {
        match field {
            ImportField::Id => &self.id,
            ImportField::Name => &self.name,
            ImportField::Group => &self.group,
            ImportField::Weight => &self.weight,
        }
    }

    /// True when no name column was found at all.
    pub fn lacks_name(&self) -> bool {
        self.name.is_empty()
    }

    /// First non-empty value for `field` in a row, following alias priority.
    pub fn value<'a>(&self, field: ImportField, cell: impl Fn(usize) -> &'a str) -> Option<&'a str> {
        self.columns(field)
            .iter()
            .map(|&column| cell(column))
            .find(|value| !value.is_empty())
    }
}

fn resolve(headers: &[String], field: ImportField) -> Vec<usize> {
    field
        .aliases()
        .iter()
        .filter_map(|alias| headers.iter().position(|header| header == alias))
        .collect()
}
