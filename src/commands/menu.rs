//! Menu command - print the menu tree

use crate::demo::{EntryView, Menus};
use crate::ui::OutputWriter;

/// Print every menu, sub-menu and form with the slug `run` accepts
pub fn execute(menus: &Menus, output: &dyn OutputWriter, quiet: bool) {
    for menu in menus.iter() {
        output.heading(&menu.title());

        for (index, sub_menu) in menu.sub_menu_titles().iter().enumerate() {
            output.write(&format!("  {sub_menu}"));

            for entry in menu.entries(index) {
                match entry {
                    EntryView::Form { name, .. } if quiet => output.write(&format!("    {name}")),
                    EntryView::Form { name, slug } => {
                        output.write(&format!("    {name} ({slug})"));
                    }
                    EntryView::Divider if quiet => {}
                    EntryView::Divider => output.info("    ----"),
                }
            }
        }
    }
}
