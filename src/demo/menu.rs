//! Menus of forms
//!
//! A menu has sub-menus; a sub-menu carries the properties shared by its
//! forms and a list of entries, each a form descriptor or a divider.

use std::fmt;

use serde::Serialize;

use super::base::DemoForm;
use crate::KeyformsError;
use crate::context::CachedValues;
use crate::form::FormError;
use crate::locale::{LocaleText, t};

/// Named constructor of one form
pub struct FormDescriptor<T> {
    /// Locale key of the form name, also used as its subtitle
    pub resource_name: &'static str,
    pub construct: fn(&T, &CachedValues) -> Result<DemoForm, FormError>,
}

impl<T> FormDescriptor<T> {
    pub const fn new(
        resource_name: &'static str,
        construct: fn(&T, &CachedValues) -> Result<DemoForm, FormError>,
    ) -> Self {
        Self {
            resource_name,
            construct,
        }
    }
}

impl<T> Clone for FormDescriptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FormDescriptor<T> {}

impl<T> fmt::Debug for FormDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormDescriptor")
            .field("resource_name", &self.resource_name)
            .finish_non_exhaustive()
    }
}

/// Sub-menu entries; `None` is a divider
pub type Entries<T> = Vec<Option<FormDescriptor<T>>>;

#[derive(Debug)]
pub struct SubMenu<T> {
    pub title: LocaleText,
    pub properties: T,
    pub entries: Entries<T>,
}

#[derive(Debug)]
pub struct Menu<T> {
    pub title: LocaleText,
    pub sub_menus: Vec<SubMenu<T>>,
}

/// One menu entry as displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryView {
    Form { name: String, slug: String },
    Divider,
}

/// Menu operations independent of the sub-menu properties type
pub trait MenuTree {
    fn title(&self) -> String;

    fn sub_menu_titles(&self) -> Vec<String>;

    /// Entries of a sub-menu; empty if the index is out of range
    fn entries(&self, sub_menu: usize) -> Vec<EntryView>;

    /// Mount a form; `None` if the indices name no form
    fn mount(
        &self,
        sub_menu: usize,
        entry: usize,
        cached: &CachedValues,
    ) -> Option<Result<DemoForm, FormError>>;
}

impl<T> MenuTree for Menu<T> {
    fn title(&self) -> String {
        self.title.resolve()
    }

    fn sub_menu_titles(&self) -> Vec<String> {
        self.sub_menus
            .iter()
            .map(|sub_menu| sub_menu.title.resolve())
            .collect()
    }

    fn entries(&self, sub_menu: usize) -> Vec<EntryView> {
        self.sub_menus
            .get(sub_menu)
            .map(|sub_menu| {
                sub_menu
                    .entries
                    .iter()
                    .map(|entry| {
                        entry.map_or(EntryView::Divider, |descriptor| {
                            let name = t(descriptor.resource_name);
                            EntryView::Form {
                                slug: slug(&name),
                                name,
                            }
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn mount(
        &self,
        sub_menu: usize,
        entry: usize,
        cached: &CachedValues,
    ) -> Option<Result<DemoForm, FormError>> {
        let sub_menu = self.sub_menus.get(sub_menu)?;
        let descriptor = (*sub_menu.entries.get(entry)?)?;

        Some((descriptor.construct)(&sub_menu.properties, cached))
    }
}

/// Location of a form in [`Menus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FormPath {
    pub menu: usize,
    pub sub_menu: usize,
    /// Index into the sub-menu's entries, dividers included
    pub entry: usize,
}

/// Lower-case, dash-separated identifier derived from a display name
#[must_use]
pub fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Top-level menus of the application
pub struct Menus {
    menus: Vec<Box<dyn MenuTree>>,
}

impl Menus {
    #[must_use]
    pub fn new(menus: Vec<Box<dyn MenuTree>>) -> Self {
        Self { menus }
    }

    /// The String and GS1 ID Key menus
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(super::string::menu()),
            Box::new(super::gs1::menu()),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn MenuTree> {
        self.menus.iter().map(|menu| &**menu)
    }

    #[must_use]
    pub fn get(&self, menu: usize) -> Option<&dyn MenuTree> {
        self.menus.get(menu).map(|menu| &**menu)
    }

    /// Find a form by the slugs of its menu, sub-menu and name
    #[must_use]
    pub fn find(&self, menu: &str, sub_menu: &str, form: &str) -> Option<FormPath> {
        let (menu_index, tree) = self
            .iter()
            .enumerate()
            .find(|(_, tree)| slug(&tree.title()) == slug(menu))?;

        let sub_menu_index = tree
            .sub_menu_titles()
            .iter()
            .position(|title| slug(title) == slug(sub_menu))?;

        let form = slug(form);
        let entry = tree
            .entries(sub_menu_index)
            .iter()
            .position(|entry| matches!(entry, EntryView::Form { slug, .. } if *slug == form))?;

        Some(FormPath {
            menu: menu_index,
            sub_menu: sub_menu_index,
            entry,
        })
    }

    /// Human-readable "menu / sub-menu / form" for `path`
    #[must_use]
    pub fn describe(&self, path: FormPath) -> String {
        let Some(tree) = self.get(path.menu) else {
            return format!("{}/{}/{}", path.menu, path.sub_menu, path.entry);
        };

        let sub_menu = tree
            .sub_menu_titles()
            .get(path.sub_menu)
            .cloned()
            .unwrap_or_else(|| path.sub_menu.to_string());
        let form = match tree.entries(path.sub_menu).get(path.entry) {
            Some(EntryView::Form { name, .. }) => name.clone(),
            _ => path.entry.to_string(),
        };

        format!("{} / {sub_menu} / {form}", tree.title())
    }

    /// Mount the form at `path`
    ///
    /// # Errors
    ///
    /// Returns `KeyformsError::UnknownForm` if `path` names no form.
    pub fn mount(&self, path: FormPath, cached: &CachedValues) -> Result<DemoForm, KeyformsError> {
        let form = self
            .get(path.menu)
            .and_then(|tree| tree.mount(path.sub_menu, path.entry, cached))
            .ok_or_else(|| KeyformsError::UnknownForm(self.describe(path)))??;

        Ok(form)
    }
}

impl fmt::Debug for Menus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.menus.iter().map(|menu| menu.title()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        assert_eq!(slug("GS1 ID Key"), "gs1-id-key");
        assert_eq!(slug("Zero expand GTIN-12"), "zero-expand-gtin-12");
        assert_eq!(slug("U.P.C. Company Prefix"), "u-p-c-company-prefix");
    }

    #[test]
    fn test_standard_menus() {
        let menus = Menus::standard();
        let titles: Vec<String> = menus.iter().map(MenuTree::title).collect();
        assert_eq!(titles, vec!["String", "GS1 ID Key"]);
    }

    #[test]
    fn test_find_and_describe() {
        let menus = Menus::standard();
        let path = menus.find("gs1-id-key", "gtin", "zero-expand-gtin-12").unwrap();

        assert_eq!(menus.describe(path), "GS1 ID Key / GTIN / Zero expand GTIN-12");
        assert!(menus.find("gs1-id-key", "gln", "zero-expand-gtin-12").is_none());
        assert!(menus.find("String", "GS1 AI 82", "Create sequence").is_some());
    }

    #[test]
    fn test_gtin_dividers() {
        let menus = Menus::standard();
        let path = menus.find("gs1-id-key", "gtin", "validate").unwrap();
        let entries = menus.get(path.menu).unwrap().entries(path.sub_menu);

        let dividers: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| **entry == EntryView::Divider)
            .map(|(index, _)| index)
            .collect();
        assert_eq!(dividers, vec![4, 7, 10]);
        assert_eq!(entries.len(), 13);
    }

    #[test]
    fn test_mount_divider_is_unknown() {
        let menus = Menus::standard();
        let path = FormPath {
            menu: 1,
            sub_menu: 0,
            entry: 4,
        };

        assert!(matches!(
            menus.mount(path, &CachedValues::default()),
            Err(KeyformsError::UnknownForm(_))
        ));
    }

    #[test]
    fn test_every_form_mounts() {
        let menus = Menus::standard();
        let cached = CachedValues::default();

        for (menu_index, tree) in menus.iter().enumerate() {
            for sub_menu in 0..tree.sub_menu_titles().len() {
                for (entry, view) in tree.entries(sub_menu).iter().enumerate() {
                    if *view == EntryView::Divider {
                        continue;
                    }
                    let path = FormPath {
                        menu: menu_index,
                        sub_menu,
                        entry,
                    };
                    assert!(menus.mount(path, &cached).is_ok(), "{}", menus.describe(path));
                }
            }
        }
    }
}
