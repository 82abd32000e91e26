use quickbar_core::{IconId, RowError};

use crate::submenu::{SubMenu, SubMenuEntry};

pub const MAX_BUTTONS: usize = 5;

/// Stable reference to a row slot. Slots are never removed or reordered,
/// so a handle stays valid for the row's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ButtonHandle(pub(crate) usize);

impl ButtonHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubItemHandle {
    pub(crate) button: usize,
    pub(crate) entry: usize,
}

impl SubItemHandle {
    pub fn button(self) -> ButtonHandle {
        ButtonHandle(self.button)
    }

    pub fn index(self) -> usize {
        self.entry
    }
}

#[derive(Clone, Debug)]
pub struct ButtonItem {
    id: i32,
    icon: IconId,
    text: Option<String>,
    hidden: bool,
    sub_menu: Option<SubMenu>,
}

impl ButtonItem {
    pub fn new(id: i32, icon: IconId) -> Self {
        Self {
            id,
            icon,
            text: None,
            hidden: false,
            sub_menu: None,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn icon(&self) -> IconId {
        self.icon
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn sub_menu(&self) -> Option<&SubMenu> {
        self.sub_menu.as_ref()
    }

    pub(crate) fn sub_menu_mut(&mut self) -> Option<&mut SubMenu> {
        self.sub_menu.as_mut()
    }

    /// True when a tap should open a popup instead of firing a click.
    pub fn has_sub_menu(&self) -> bool {
        self.sub_menu.as_ref().is_some_and(SubMenu::has_entries)
    }

    pub fn is_sub_menu_open(&self) -> bool {
        self.sub_menu.as_ref().is_some_and(SubMenu::is_open)
    }
}

/// Mutable access to one button. Every setter flags the owning row for redraw.
pub struct ButtonMut<'a> {
    pub(crate) index: usize,
    pub(crate) item: &'a mut ButtonItem,
    pub(crate) invalidated: &'a mut bool,
}

impl ButtonMut<'_> {
    pub fn item(&self) -> &ButtonItem {
        self.item
    }

    pub fn handle(&self) -> ButtonHandle {
        ButtonHandle(self.index)
    }

    pub fn set_icon(&mut self, icon: IconId) -> &mut Self {
        self.item.icon = icon;
        *self.invalidated = true;
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.item.text = Some(text.into());
        *self.invalidated = true;
        self
    }

    pub fn clear_text(&mut self) -> &mut Self {
        self.item.text = None;
        *self.invalidated = true;
        self
    }

    /// Hidden buttons keep their slot but are neither drawn nor hit.
    pub fn set_hidden(&mut self, hidden: bool) -> &mut Self {
        self.item.hidden = hidden;
        *self.invalidated = true;
        self
    }

    /// Adds an entry that dismisses the popup on click and shows no check.
    pub fn add_sub_item(&mut self, id: i32, icon: IconId, label: impl Into<String>) -> SubItemHandle {
        self.add_sub_item_entry(SubMenuEntry::new(id, icon, label))
    }

    pub fn add_sub_item_with(
        &mut self,
        id: i32,
        icon: IconId,
        label: impl Into<String>,
        dismiss_on_click: bool,
        show_check: bool,
    ) -> SubItemHandle {
        self.add_sub_item_entry(
            SubMenuEntry::new(id, icon, label)
                .dismiss_on_click(dismiss_on_click)
                .show_check(show_check),
        )
    }

    pub fn add_sub_item_entry(&mut self, entry: SubMenuEntry) -> SubItemHandle {
        let menu = self.item.sub_menu.get_or_insert_with(SubMenu::new);
        let entry = menu.push(entry);
        *self.invalidated = true;
        SubItemHandle {
            button: self.index,
            entry,
        }
    }

    /// Drops every entry; the button falls back to plain click behaviour.
    pub fn remove_all_sub_items(&mut self) -> &mut Self {
        if let Some(menu) = self.item.sub_menu.as_mut() {
            menu.clear();
            *self.invalidated = true;
        }
        self
    }

    pub fn set_sub_item_checked(&mut self, handle: SubItemHandle, checked: bool) -> Result<(), RowError> {
        let unknown = RowError::UnknownEntry {
            button: handle.button,
            entry: handle.entry,
        };
        if handle.button != self.index {
            return Err(unknown);
        }
        let entry = self
            .item
            .sub_menu
            .as_mut()
            .and_then(|m| m.entry_mut(handle.entry))
            .ok_or(unknown)?;
        entry.checked = checked;
        *self.invalidated = true;
        Ok(())
    }
}
