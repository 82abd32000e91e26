use std::rc::Rc;

use quickbar_core::animation::AnimationSpec;
use quickbar_core::{
    Color, HapticKind, Host, Key, KeyEvent, KeyState, PointerEvent, PointerEventKind, Rect, Role,
    RowError, Scene, Semantics, Size, Vec2, dp,
};
use smallvec::SmallVec;
use web_time::Instant;

use crate::anim::ExpansionAnimator;
use crate::hit::{PressOutcome, PressTracker, hit_test};
use crate::item::{ButtonHandle, ButtonItem, ButtonMut, MAX_BUTTONS};
use crate::layout::{RowGeometry, measured_height};
use crate::paint::{paint_row, paint_sub_menu};
use crate::popup::{PopupPlacement, PopupRequest, position_popup};
use crate::style::{PopupStyle, RowStyle, clamp_unit};

/// A committed tap on a plain button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonClick {
    pub id: i32,
    pub index: usize,
    /// Center of the button in screen coordinates, for anchoring follow-up UI.
    pub center: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubMenuEntryClick {
    pub button_id: i32,
    pub entry_id: i32,
}

pub type ClickListener = Rc<dyn Fn(ButtonClick)>;
pub type SubItemClickListener = Rc<dyn Fn(SubMenuEntryClick)>;

/// Interaction and visual state at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowState {
    pub progress: f32,
    pub pressed: Option<usize>,
    pub pending_click: Option<usize>,
    pub background_alpha: f32,
    pub disabled_content_alpha: f32,
}

/// A row of up to `MAX_BUTTONS` icon+label buttons.
///
/// The host owns the row and drives it from its UI thread: `measure` during
/// layout, `paint` during draw, `handle_pointer`/`handle_popup_pointer`/
/// `handle_key` on input, `tick` on animation frames. Listeners run
/// synchronously from inside those calls and must not call back into the row.
pub struct ButtonsRow {
    host: Rc<dyn Host>,
    buttons: SmallVec<[ButtonItem; MAX_BUTTONS]>,
    style: RowStyle,
    popup_style: PopupStyle,
    progress: f32,
    expansion: ExpansionAnimator,
    press: PressTracker,
    pending_click: Option<usize>,
    measured_width: i32,
    screen_origin: Vec2,
    on_click: Option<ClickListener>,
    on_sub_item_click: Option<SubItemClickListener>,
    invalidated: bool,
    layout_requested: bool,
}

impl ButtonsRow {
    /// A fully expanded, empty row styled from the current theme.
    pub fn new(host: Rc<dyn Host>) -> Self {
        let theme = quickbar_core::theme();
        Self {
            host,
            buttons: SmallVec::new(),
            style: RowStyle::from_theme(&theme),
            popup_style: PopupStyle::from_theme(&theme),
            progress: 1.0,
            expansion: ExpansionAnimator::new(1.0),
            press: PressTracker::new(),
            pending_click: None,
            measured_width: 0,
            screen_origin: Vec2::ZERO,
            on_click: None,
            on_sub_item_click: None,
            invalidated: false,
            layout_requested: false,
        }
    }

    pub fn with_style(mut self, style: RowStyle) -> Self {
        self.set_style(style);
        self
    }

    pub fn with_popup_style(mut self, style: PopupStyle) -> Self {
        self.popup_style = style.sanitized();
        self
    }

    // ---- buttons ----

    /// Appends a button. Past `MAX_BUTTONS` the call is ignored and returns `None`.
    pub fn add_button(&mut self, id: i32, icon: quickbar_core::IconId) -> Option<ButtonHandle> {
        match self.try_add_button(id, icon) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("add_button({id}) rejected: {e}");
                None
            }
        }
    }

    pub fn try_add_button(
        &mut self,
        id: i32,
        icon: quickbar_core::IconId,
    ) -> Result<ButtonHandle, RowError> {
        if self.buttons.len() >= MAX_BUTTONS {
            return Err(RowError::CapacityExceeded { max: MAX_BUTTONS });
        }
        self.buttons.push(ButtonItem::new(id, icon));
        self.layout_requested = true;
        self.invalidated = true;
        Ok(ButtonHandle(self.buttons.len() - 1))
    }

    pub fn buttons(&self) -> &[ButtonItem] {
        &self.buttons
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn button(&self, handle: ButtonHandle) -> Option<&ButtonItem> {
        self.buttons.get(handle.0)
    }

    pub fn button_mut(&mut self, handle: ButtonHandle) -> Option<ButtonMut<'_>> {
        self.try_button_mut(handle).ok()
    }

    pub fn try_button_mut(&mut self, handle: ButtonHandle) -> Result<ButtonMut<'_>, RowError> {
        let item = self
            .buttons
            .get_mut(handle.0)
            .ok_or(RowError::UnknownButton(handle.0))?;
        Ok(ButtonMut {
            index: handle.0,
            item,
            invalidated: &mut self.invalidated,
        })
    }

    /// Index of the first button with `id`.
    pub fn index_of(&self, id: i32) -> Option<usize> {
        self.buttons.iter().position(|b| b.id() == id)
    }

    // ---- listeners ----

    pub fn set_on_click(&mut self, f: impl Fn(ButtonClick) + 'static) {
        self.on_click = Some(Rc::new(f));
    }

    pub fn set_on_sub_item_click(&mut self, f: impl Fn(SubMenuEntryClick) + 'static) {
        self.on_sub_item_click = Some(Rc::new(f));
    }

    // ---- expansion ----

    pub fn expansion_progress(&self) -> f32 {
        self.progress
    }

    /// Jumps to `progress`, clamped to [0, 1], cancelling any running animation.
    pub fn set_expansion_progress(&mut self, progress: f32) {
        let progress = clamp_unit(progress);
        self.expansion.snap_to(progress);
        self.apply_progress(progress);
    }

    /// Starts animating towards `target`; drive it with `tick`.
    pub fn animate_expansion(&mut self, target: f32, spec: AnimationSpec, now: Instant) {
        self.expansion.animate_to(clamp_unit(target), spec, now);
    }

    pub fn is_animating(&self) -> bool {
        self.expansion.is_running()
    }

    /// Advances the expansion animation; returns true while more frames are needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let running = self.expansion.tick(now);
        self.apply_progress(self.expansion.value());
        running
    }

    fn apply_progress(&mut self, progress: f32) {
        if self.progress == progress {
            return;
        }
        self.progress = progress;
        if progress <= 0.0 {
            self.press.reset();
        }
        self.layout_requested = true;
        self.invalidated = true;
    }

    // ---- style ----

    pub fn style(&self) -> &RowStyle {
        &self.style
    }

    /// Replaces the style. Out-of-range dimensions and alphas are clamped
    /// (see `RowStyle::sanitized`).
    pub fn set_style(&mut self, style: RowStyle) {
        let sanitized = style.sanitized();
        if sanitized != style {
            log::warn!("row style out of range, clamped: {sanitized:?}");
        }
        self.style = sanitized;
        self.layout_requested = true;
        self.invalidated = true;
    }

    pub fn popup_style(&self) -> &PopupStyle {
        &self.popup_style
    }

    pub fn set_background_alpha(&mut self, alpha: f32) {
        self.style.background_alpha = clamp_unit(alpha);
        self.invalidated = true;
    }

    pub fn set_disabled_content_alpha(&mut self, alpha: f32) {
        self.style.disabled_content_alpha = clamp_unit(alpha);
        self.invalidated = true;
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.style.background_color = color;
        self.invalidated = true;
    }

    pub fn set_content_color(&mut self, color: Color) {
        self.style.content_color = color;
        self.invalidated = true;
    }

    // ---- layout ----

    /// Layout pass: records `width` and returns the size the row wants.
    pub fn measure(&mut self, width: f32) -> Size {
        self.measured_width = width.max(0.0) as i32;
        self.layout_requested = false;
        Size::new(
            self.measured_width as f32,
            measured_height(self.buttons.len(), self.progress, &self.style) as f32,
        )
    }

    /// Where the row's top-left corner is on screen, as reported by the host after layout.
    pub fn set_screen_origin(&mut self, origin: Vec2) {
        self.screen_origin = origin;
    }

    pub fn screen_origin(&self) -> Vec2 {
        self.screen_origin
    }

    pub fn geometry(&self) -> RowGeometry {
        RowGeometry::compute(
            self.measured_width,
            self.buttons.len(),
            self.progress,
            &self.style,
        )
    }

    pub fn state(&self) -> RowState {
        RowState {
            progress: self.progress,
            pressed: self.press.pressed(),
            pending_click: self.pending_click,
            background_alpha: self.style.background_alpha,
            disabled_content_alpha: self.style.disabled_content_alpha,
        }
    }

    /// Button rectangle in screen coordinates.
    pub fn button_screen_rect(&self, index: usize) -> Option<Rect> {
        self.geometry()
            .button_rect(index)
            .map(|r| r.translate(self.screen_origin))
    }

    /// Returns and clears the redraw flag.
    pub fn take_invalidated(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }

    /// True when the reported height may have changed since the last `measure`.
    pub fn needs_layout(&self) -> bool {
        self.layout_requested
    }

    // ---- drawing ----

    pub fn paint(&self, scene: &mut Scene) {
        paint_row(
            scene,
            &self.geometry(),
            &self.buttons,
            self.press.pressed(),
            &self.style,
            self.host.as_ref(),
        );
    }

    /// Draws the open sub-menu, if any, in screen coordinates.
    pub fn paint_sub_menu(&self, scene: &mut Scene) {
        if let Some(menu) = self.open_sub_menu_index().and_then(|i| self.buttons[i].sub_menu()) {
            paint_sub_menu(scene, menu, &self.popup_style, self.host.as_ref());
        }
    }

    // ---- pointer input ----

    /// Row-local pointer input. Only down, up and cancel are handled; returns
    /// whether the event was consumed.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        let geometry = self.geometry();
        if !geometry.is_visible() {
            if self.press.reset().is_some() {
                self.invalidated = true;
            }
            return false;
        }
        if !matches!(
            event.event,
            PointerEventKind::Down | PointerEventKind::Up | PointerEventKind::Cancel
        ) {
            return false;
        }

        let hit = hit_test(&geometry, &self.buttons, event.position);
        match self.press.handle(event.event, hit) {
            PressOutcome::Pressed(_) => {
                self.invalidated = true;
                true
            }
            PressOutcome::Committed(index) => {
                self.commit(index);
                self.invalidated = true;
                true
            }
            PressOutcome::Released(_) => {
                self.invalidated = true;
                false
            }
            PressOutcome::Ignored => false,
        }
    }

    fn commit(&mut self, index: usize) {
        log::debug!("commit button #{index} (id {})", self.buttons[index].id());
        if self.buttons[index].has_sub_menu() {
            self.toggle_sub_menu(index);
        } else {
            self.pending_click = Some(index);
            self.perform_click();
        }
    }

    /// Fires the pending click: listener, then a haptic tap. Returns false
    /// when no click is pending.
    pub fn perform_click(&mut self) -> bool {
        let Some(index) = self.pending_click.take() else {
            return false;
        };
        let Some(item) = self.buttons.get(index) else {
            return false;
        };
        if item.has_sub_menu() {
            return true;
        }

        let center = self
            .button_screen_rect(index)
            .map(|r| r.center())
            .unwrap_or(self.screen_origin);
        let click = ButtonClick {
            id: item.id(),
            index,
            center,
        };
        if let Some(cb) = self.on_click.clone() {
            cb(click);
        }
        self.host.perform_haptic(HapticKind::KeyboardTap);
        true
    }

    // ---- sub-menus ----

    pub fn open_sub_menu_index(&self) -> Option<usize> {
        self.buttons.iter().position(ButtonItem::is_sub_menu_open)
    }

    /// The open popup and its owner, for the host to show its overlay window.
    pub fn open_sub_menu_placement(&self) -> Option<(ButtonHandle, PopupPlacement)> {
        let index = self.open_sub_menu_index()?;
        let placement = self.buttons[index].sub_menu()?.placement()?;
        Some((ButtonHandle(index), placement))
    }

    /// Opens the button's sub-menu, or closes it if already open. Returns
    /// whether the menu is open afterwards.
    pub fn show_sub_menu(&mut self, handle: ButtonHandle) -> bool {
        if handle.0 >= self.buttons.len() || !self.buttons[handle.0].has_sub_menu() {
            return false;
        }
        self.toggle_sub_menu(handle.0)
    }

    pub fn hide_sub_menu(&mut self, handle: ButtonHandle) {
        let closed = self
            .buttons
            .get_mut(handle.0)
            .and_then(ButtonItem::sub_menu_mut)
            .is_some_and(|m| m.close());
        if closed {
            log::debug!("sub-menu of button #{} closed", handle.0);
            self.invalidated = true;
        }
    }

    /// Closes whichever sub-menu is open. Safe to call at any time.
    pub fn dismiss_all_sub_menus(&mut self) {
        for i in 0..self.buttons.len() {
            self.hide_sub_menu(ButtonHandle(i));
        }
    }

    fn toggle_sub_menu(&mut self, index: usize) -> bool {
        if self.buttons[index].is_sub_menu_open() {
            self.hide_sub_menu(ButtonHandle(index));
            return false;
        }
        self.dismiss_all_sub_menus();

        let Some(anchor) = self.button_screen_rect(index) else {
            return false;
        };
        let screen = self.host.screen_size();
        let geometry = self.geometry();
        let row = Rect::new(
            self.screen_origin.x,
            self.screen_origin.y,
            geometry.measured_width as f32,
            geometry.row_height as f32,
        );
        let style = self.popup_style;
        let host = Rc::clone(&self.host);
        let Some(menu) = self.buttons[index].sub_menu_mut() else {
            return false;
        };

        let popup = menu.measure(&style, host.as_ref(), screen);
        let placement = position_popup(&PopupRequest {
            anchor,
            row,
            popup,
            screen,
            margin: dp(style.screen_margin_dp),
            gap: dp(style.anchor_gap_dp),
        });
        log::debug!(
            "sub-menu of button #{index} open at ({}, {}) {:?}",
            placement.origin.x,
            placement.origin.y,
            placement.side
        );
        menu.open(placement);
        self.invalidated = true;
        true
    }

    /// Screen-space pointer input for the open popup. A down outside the popup
    /// dismisses it; a down/up pair on one entry reports an entry click.
    pub fn handle_popup_pointer(&mut self, event: &PointerEvent) -> bool {
        let Some(index) = self.open_sub_menu_index() else {
            return false;
        };
        let style = self.popup_style;
        let button_id = self.buttons[index].id();
        let Some(menu) = self.buttons[index].sub_menu_mut() else {
            return false;
        };
        let Some(placement) = menu.placement() else {
            return false;
        };
        let inside = placement.rect().contains(event.position);
        let entry = menu.entry_at(event.position, &style);

        match event.event {
            PointerEventKind::Down => {
                if !inside {
                    log::debug!("outside tap dismisses sub-menu of button #{index}");
                    menu.close();
                } else {
                    menu.set_pressed_entry(entry);
                }
                self.invalidated = true;
                true
            }
            PointerEventKind::Up => {
                let pressed = menu.pressed_entry();
                menu.set_pressed_entry(None);
                let clicked = pressed.filter(|p| entry == Some(*p));
                let Some(clicked) = clicked.and_then(|i| menu.entry(i).cloned()) else {
                    self.invalidated |= pressed.is_some();
                    return inside || pressed.is_some();
                };
                if clicked.dismiss_on_click {
                    menu.close();
                }
                self.invalidated = true;
                log::debug!("sub-menu entry {} of button {button_id} clicked", clicked.id);
                if let Some(cb) = self.on_sub_item_click.clone() {
                    cb(SubMenuEntryClick {
                        button_id,
                        entry_id: clicked.id,
                    });
                }
                true
            }
            PointerEventKind::Cancel => {
                if menu.pressed_entry().is_some() {
                    menu.set_pressed_entry(None);
                    self.invalidated = true;
                }
                true
            }
            PointerEventKind::Move | PointerEventKind::Enter | PointerEventKind::Leave => inside,
        }
    }

    /// Back/Escape on press and Menu on release dismiss the open popup.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if event.is_repeat || self.open_sub_menu_index().is_none() {
            return false;
        }
        let dismiss = match (event.key, event.state) {
            (Key::Back | Key::Escape, KeyState::Pressed) => true,
            (Key::Menu, KeyState::Released) => true,
            _ => false,
        };
        if dismiss {
            self.dismiss_all_sub_menus();
        }
        dismiss
    }

    // ---- accessibility ----

    /// One node per visible button, in row-local coordinates.
    pub fn semantics(&self) -> Vec<Semantics> {
        let geometry = self.geometry();
        if !geometry.is_visible() {
            return Vec::new();
        }
        let pressed = self.press.pressed();
        geometry
            .button_rects()
            .filter_map(|(i, rect)| {
                let item = self.buttons.get(i).filter(|b| !b.is_hidden())?;
                let role = if item.has_sub_menu() {
                    Role::MenuButton
                } else {
                    Role::Button
                };
                Some(
                    Semantics::new(role, rect)
                        .label(item.text().map(str::to_string))
                        .selected(pressed == Some(i) || item.is_sub_menu_open()),
                )
            })
            .collect()
    }

    /// One node per entry of the open popup, in screen coordinates.
    pub fn sub_menu_semantics(&self) -> Vec<Semantics> {
        let Some(menu) = self
            .open_sub_menu_index()
            .and_then(|i| self.buttons[i].sub_menu())
        else {
            return Vec::new();
        };
        let Some(placement) = menu.placement() else {
            return Vec::new();
        };
        menu.entries()
            .iter()
            .enumerate()
            .filter_map(|(i, e)| {
                let rect = menu.entry_rect(i, &placement, &self.popup_style)?;
                Some(
                    Semantics::new(Role::MenuItem, rect)
                        .label(Some(e.label.clone()))
                        .selected(e.show_check && e.checked),
                )
            })
            .collect()
    }
}
