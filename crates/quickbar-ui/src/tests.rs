#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use quickbar_core::animation::{AnimationSpec, Easing};
    use quickbar_core::*;
    use web_time::{Duration, Instant};

    use crate::*;

    /// Icons resolve for every id except 0; text is 0.5em per byte.
    #[derive(Default)]
    struct FakeHost {
        haptics: RefCell<Vec<HapticKind>>,
    }

    impl Host for FakeHost {
        fn resolve_icon(&self, icon: IconId) -> Option<ImageHandle> {
            (icon.0 != 0).then_some(ImageHandle(icon.0 as u64))
        }
        fn font_metrics(&self, size_px: f32) -> FontMetrics {
            FontMetrics {
                ascent: -0.8 * size_px,
                descent: 0.25 * size_px,
            }
        }
        fn text_width(&self, text: &str, size_px: f32) -> f32 {
            text.len() as f32 * size_px * 0.5
        }
        fn screen_size(&self) -> Size {
            Size::new(360.0, 800.0)
        }
        fn perform_haptic(&self, kind: HapticKind) {
            self.haptics.borrow_mut().push(kind);
        }
    }

    struct Fixture {
        host: Rc<FakeHost>,
        row: ButtonsRow,
        clicks: Rc<RefCell<Vec<ButtonClick>>>,
        entry_clicks: Rc<RefCell<Vec<SubMenuEntryClick>>>,
    }

    fn fixture(count: i32) -> Fixture {
        let host = Rc::new(FakeHost::default());
        let mut row = ButtonsRow::new(host.clone());
        for i in 0..count {
            let h = row.add_button(100 + i, IconId(i + 1)).unwrap();
            row.button_mut(h).unwrap().set_text(format!("B{i}"));
        }
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let entry_clicks = Rc::new(RefCell::new(Vec::new()));
        {
            let clicks = clicks.clone();
            row.set_on_click(move |c| clicks.borrow_mut().push(c));
        }
        {
            let entry_clicks = entry_clicks.clone();
            row.set_on_sub_item_click(move |c| entry_clicks.borrow_mut().push(c));
        }
        row.measure(360.0);
        row.set_screen_origin(Vec2::new(0.0, 700.0));
        Fixture {
            host,
            row,
            clicks,
            entry_clicks,
        }
    }

    fn tap(row: &mut ButtonsRow, p: Vec2) -> bool {
        let down = row.handle_pointer(&PointerEvent::down(p.x, p.y));
        let up = row.handle_pointer(&PointerEvent::up(p.x, p.y));
        down && up
    }

    fn center_of(row: &ButtonsRow, index: usize) -> Vec2 {
        row.geometry().button_rect(index).unwrap().center()
    }

    fn count_rects(scene: &Scene) -> usize {
        scene
            .nodes
            .iter()
            .filter(|n| matches!(n, SceneNode::Rect { .. }))
            .count()
    }

    #[test]
    fn sixth_button_is_rejected() {
        let mut f = fixture(5);
        assert!(f.row.add_button(999, IconId(1)).is_none());
        assert_eq!(
            f.row.try_add_button(999, IconId(1)),
            Err(RowError::CapacityExceeded { max: MAX_BUTTONS })
        );
        assert_eq!(f.row.len(), 5);

        let mut scene = Scene::new();
        f.row.paint(&mut scene);
        assert_eq!(count_rects(&scene), 5);
    }

    #[test]
    fn collapsed_row_measures_min_height_and_ignores_touches() {
        let mut f = fixture(3);
        f.row.set_expansion_progress(0.0);
        assert_eq!(f.row.measure(360.0).height, 20.0);

        let expanded = RowGeometry::compute(360, 3, 1.0, f.row.style());
        for (_, r) in expanded.button_rects() {
            assert!(!f.row.handle_pointer(&PointerEvent::down(r.center().x, r.center().y)));
            assert_eq!(hit_test(&f.row.geometry(), f.row.buttons(), r.center()), None);
        }

        let mut scene = Scene::new();
        f.row.paint(&mut scene);
        assert!(scene.is_empty());
        assert!(f.row.semantics().is_empty());
    }

    #[test]
    fn empty_row_measures_zero() {
        let host = Rc::new(FakeHost::default());
        let mut row = ButtonsRow::new(host);
        assert_eq!(row.measure(360.0), Size::new(360.0, 0.0));
        assert!(!row.handle_pointer(&PointerEvent::down(20.0, 10.0)));
    }

    #[test]
    fn progress_is_clamped() {
        let mut f = fixture(2);
        f.row.set_expansion_progress(7.5);
        assert_eq!(f.row.expansion_progress(), 1.0);
        f.row.set_expansion_progress(-3.0);
        assert_eq!(f.row.expansion_progress(), 0.0);
        f.row.set_expansion_progress(f32::NAN);
        assert_eq!(f.row.expansion_progress(), 0.0);
    }

    #[test]
    fn tap_fires_click_with_screen_center_and_haptic() {
        let mut f = fixture(3);
        let c = center_of(&f.row, 1);
        assert!(tap(&mut f.row, c));

        let clicks = f.clicks.borrow();
        assert_eq!(clicks.len(), 1);
        assert_eq!(clicks[0].id, 101);
        assert_eq!(clicks[0].index, 1);
        assert_eq!(clicks[0].center, Vec2::new(c.x, c.y + 700.0));
        assert_eq!(*f.host.haptics.borrow(), vec![HapticKind::KeyboardTap]);
        assert_eq!(f.row.state().pending_click, None);
        assert!(!f.row.perform_click());
    }

    #[test]
    fn release_outside_commits_nothing() {
        let mut f = fixture(3);
        let a = center_of(&f.row, 0);
        let b = center_of(&f.row, 2);

        assert!(f.row.handle_pointer(&PointerEvent::down(a.x, a.y)));
        assert_eq!(f.row.state().pressed, Some(0));
        assert!(!f.row.handle_pointer(&PointerEvent::moved(b.x, b.y)));
        assert!(!f.row.handle_pointer(&PointerEvent::up(b.x, b.y)));
        assert_eq!(f.row.state().pressed, None);

        f.row.handle_pointer(&PointerEvent::down(a.x, a.y));
        f.row.handle_pointer(&PointerEvent::up(a.x, 500.0));
        f.row.handle_pointer(&PointerEvent::down(a.x, a.y));
        f.row.handle_pointer(&PointerEvent::cancel(a.x, a.y));

        assert!(f.clicks.borrow().is_empty());
        assert!(f.host.haptics.borrow().is_empty());
    }

    #[test]
    fn pressed_button_content_is_dimmed() {
        let mut f = fixture(2);
        let a = center_of(&f.row, 0);
        f.row.handle_pointer(&PointerEvent::down(a.x, a.y));

        let mut scene = Scene::new();
        f.row.paint(&mut scene);
        let alphas: Vec<u8> = scene
            .nodes
            .iter()
            .filter_map(|n| match n {
                SceneNode::Image { alpha, .. } => Some(*alpha),
                _ => None,
            })
            .collect();
        assert_eq!(alphas, vec![128, 255]);

        let text_alphas: Vec<u8> = scene
            .nodes
            .iter()
            .filter_map(|n| match n {
                SceneNode::Text { color, .. } => Some(color.alpha()),
                _ => None,
            })
            .collect();
        assert_eq!(text_alphas, vec![128, 255]);
    }

    #[test]
    fn paint_layout_matches_geometry() {
        let f = fixture(3);
        let g = f.row.geometry();
        let mut scene = Scene::new();
        f.row.paint(&mut scene);

        let mut backgrounds = scene.nodes.iter().filter_map(|n| match n {
            SceneNode::Rect { rect, color, radius } => Some((*rect, *color, *radius)),
            _ => None,
        });
        for (_, r) in g.button_rects() {
            let (rect, color, radius) = backgrounds.next().unwrap();
            assert_eq!(rect, r);
            assert_eq!(color, Color::BLACK.with_alpha(26)); // round(255 * 0.1)
            assert_eq!(radius, 10.0);
        }

        let icon = scene
            .nodes
            .iter()
            .find_map(|n| match n {
                SceneNode::Image { rect, .. } => Some(*rect),
                _ => None,
            })
            .unwrap();
        // (106 - 24) / 2 = 41 past the first slot's left edge, 8 from the top
        assert_eq!(icon, Rect::new(12.0 + 41.0, 8.0, 24.0, 24.0));

        let (origin, size) = scene
            .nodes
            .iter()
            .find_map(|n| match n {
                SceneNode::Text { origin, size, .. } => Some((*origin, *size)),
                _ => None,
            })
            .unwrap();
        assert_eq!(size, 11.0);
        // 56 - 8 - 2.75, truncated
        assert_eq!(origin, Vec2::new(12.0 + 53.0, 45.0));
        assert!(origin.y - 0.8 * size > icon.bottom(), "label overlaps icon");
    }

    #[test]
    fn missing_icon_and_empty_text_draw_nothing() {
        let host = Rc::new(FakeHost::default());
        let mut row = ButtonsRow::new(host);
        let a = row.add_button(1, IconId(0)).unwrap();
        row.button_mut(a).unwrap().set_text("Label");
        let b = row.add_button(2, IconId(5)).unwrap();
        row.button_mut(b).unwrap().set_text("");
        row.measure(360.0);

        let mut scene = Scene::new();
        row.paint(&mut scene);
        let images = scene
            .nodes
            .iter()
            .filter(|n| matches!(n, SceneNode::Image { .. }))
            .count();
        let texts: Vec<&str> = scene
            .nodes
            .iter()
            .filter_map(|n| match n {
                SceneNode::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(count_rects(&scene), 2);
        assert_eq!(images, 1);
        assert_eq!(texts, vec!["Label"]);
    }

    #[test]
    fn tiny_progress_skips_labels() {
        let mut f = fixture(2);
        // sqrt(0.005) * 11 < 1
        f.row.set_expansion_progress(0.005);
        let mut scene = Scene::new();
        f.row.paint(&mut scene);
        assert_eq!(count_rects(&scene), 2);
        assert!(!scene.nodes.iter().any(|n| matches!(n, SceneNode::Text { .. })));
    }

    #[test]
    fn hidden_button_leaves_a_gap() {
        let mut f = fixture(3);
        f.row.button_mut(ButtonHandle(1)).unwrap().set_hidden(true);
        assert!(f.row.take_invalidated());

        let mut scene = Scene::new();
        f.row.paint(&mut scene);
        let rects: Vec<Rect> = scene
            .nodes
            .iter()
            .filter_map(|n| match n {
                SceneNode::Rect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        let g = f.row.geometry();
        assert_eq!(rects, vec![g.button_rect(0).unwrap(), g.button_rect(2).unwrap()]);

        let gap = center_of(&f.row, 1);
        assert!(!tap(&mut f.row, gap));
        assert!(f.clicks.borrow().is_empty());
        assert_eq!(f.row.semantics().len(), 2);
    }

    #[test]
    fn button_setters_invalidate() {
        let mut f = fixture(1);
        f.row.take_invalidated();
        f.row.button_mut(ButtonHandle(0)).unwrap().set_icon(IconId(42));
        assert!(f.row.take_invalidated());
        assert!(!f.row.take_invalidated());
        assert_eq!(f.row.buttons()[0].icon(), IconId(42));
        assert!(f.row.button_mut(ButtonHandle(3)).is_none());
        assert!(matches!(
            f.row.try_button_mut(ButtonHandle(3)),
            Err(RowError::UnknownButton(3))
        ));
    }

    fn add_menu(row: &mut ButtonsRow, index: usize, label: &str) -> SubItemHandle {
        let mut b = row.button_mut(ButtonHandle(index)).unwrap();
        b.add_sub_item(7, IconId(70), label)
    }

    #[test]
    fn sub_menu_opens_clamped_and_toggles_without_click() {
        let mut f = fixture(5);
        // 18 + 24 + 16 + 28 * 8 + 18 = 300 wide, 8 + 48 + 8 = 64 tall
        add_menu(&mut f.row, 4, &"x".repeat(28));
        let c = center_of(&f.row, 4);

        assert!(tap(&mut f.row, c));
        let (owner, placement) = f.row.open_sub_menu_placement().unwrap();
        assert_eq!(owner, ButtonHandle(4));
        assert_eq!(placement.size, Size::new(300.0, 64.0));
        assert_eq!(placement.origin, Vec2::new(360.0 - 16.0 - 300.0, 700.0 - 64.0 - 8.0));
        assert_eq!(placement.side, PopupSide::Above);

        assert!(tap(&mut f.row, c));
        assert!(f.row.open_sub_menu_placement().is_none());
        assert!(f.clicks.borrow().is_empty());
        assert!(f.host.haptics.borrow().is_empty());
    }

    #[test]
    fn popup_flips_below_near_top_of_screen() {
        let mut f = fixture(2);
        add_menu(&mut f.row, 0, "Copy");
        f.row.set_screen_origin(Vec2::new(0.0, 30.0));
        f.row.show_sub_menu(ButtonHandle(0));
        let (_, p) = f.row.open_sub_menu_placement().unwrap();
        assert_eq!(p.side, PopupSide::Below);
        assert_eq!(p.origin.y, 30.0 + 56.0 + 8.0);
        // min width wins for short labels
        assert_eq!(p.size.width, 196.0);
        assert_eq!(p.origin.x, 16.0);
    }

    #[test]
    fn opening_second_menu_closes_first() {
        let mut f = fixture(3);
        add_menu(&mut f.row, 0, "A");
        add_menu(&mut f.row, 2, "B");

        assert!(f.row.show_sub_menu(ButtonHandle(0)));
        assert!(f.row.show_sub_menu(ButtonHandle(2)));
        assert!(!f.row.buttons()[0].is_sub_menu_open());
        assert!(f.row.buttons()[2].is_sub_menu_open());
        assert_eq!(f.row.open_sub_menu_index(), Some(2));
    }

    #[test]
    fn entry_click_reports_ids_and_dismisses() {
        let mut f = fixture(3);
        add_menu(&mut f.row, 1, "Forward");
        f.row
            .button_mut(ButtonHandle(1))
            .unwrap()
            .add_sub_item_with(8, IconId(80), "Stay", false, true);
        f.row.show_sub_menu(ButtonHandle(1));
        let (_, p) = f.row.open_sub_menu_placement().unwrap();

        // second entry: dismiss_on_click = false
        let second = Vec2::new(p.origin.x + 20.0, p.origin.y + 8.0 + 48.0 + 24.0);
        assert!(f.row.handle_popup_pointer(&PointerEvent::down(second.x, second.y)));
        assert_eq!(
            f.row.buttons()[1].sub_menu().unwrap().pressed_entry(),
            Some(1)
        );
        assert!(f.row.handle_popup_pointer(&PointerEvent::up(second.x, second.y)));
        assert!(f.row.open_sub_menu_placement().is_some());

        let first = Vec2::new(p.origin.x + 20.0, p.origin.y + 8.0 + 24.0);
        f.row.handle_popup_pointer(&PointerEvent::down(first.x, first.y));
        f.row.handle_popup_pointer(&PointerEvent::up(first.x, first.y));
        assert!(f.row.open_sub_menu_placement().is_none());

        assert_eq!(
            *f.entry_clicks.borrow(),
            vec![
                SubMenuEntryClick { button_id: 101, entry_id: 8 },
                SubMenuEntryClick { button_id: 101, entry_id: 7 },
            ]
        );
        assert!(f.clicks.borrow().is_empty());
    }

    #[test]
    fn entry_release_on_other_entry_does_not_click() {
        let mut f = fixture(1);
        add_menu(&mut f.row, 0, "One");
        f.row
            .button_mut(ButtonHandle(0))
            .unwrap()
            .add_sub_item(9, IconId(90), "Two");
        f.row.show_sub_menu(ButtonHandle(0));
        let (_, p) = f.row.open_sub_menu_placement().unwrap();

        let first = Vec2::new(p.origin.x + 20.0, p.origin.y + 8.0 + 24.0);
        let second = Vec2::new(first.x, first.y + 48.0);
        f.row.handle_popup_pointer(&PointerEvent::down(first.x, first.y));
        f.row.handle_popup_pointer(&PointerEvent::up(second.x, second.y));
        assert!(f.entry_clicks.borrow().is_empty());
        assert!(f.row.open_sub_menu_placement().is_some());
    }

    #[test]
    fn outside_tap_and_keys_dismiss_idempotently() {
        let mut f = fixture(2);
        add_menu(&mut f.row, 0, "Copy");

        f.row.show_sub_menu(ButtonHandle(0));
        assert!(f.row.handle_popup_pointer(&PointerEvent::down(350.0, 790.0)));
        assert!(f.row.open_sub_menu_placement().is_none());
        assert!(!f.row.handle_popup_pointer(&PointerEvent::down(350.0, 790.0)));

        f.row.show_sub_menu(ButtonHandle(0));
        let repeat = KeyEvent {
            is_repeat: true,
            ..KeyEvent::pressed(Key::Back)
        };
        assert!(!f.row.handle_key(&repeat));
        assert!(!f.row.handle_key(&KeyEvent::pressed(Key::Enter)));
        assert!(f.row.handle_key(&KeyEvent::pressed(Key::Back)));
        assert!(f.row.open_sub_menu_placement().is_none());
        assert!(!f.row.handle_key(&KeyEvent::pressed(Key::Back)));

        f.row.show_sub_menu(ButtonHandle(0));
        assert!(!f.row.handle_key(&KeyEvent::pressed(Key::Menu)));
        assert!(f.row.handle_key(&KeyEvent::released(Key::Menu)));

        f.row.dismiss_all_sub_menus();
        f.row.dismiss_all_sub_menus();
        assert!(f.row.open_sub_menu_placement().is_none());
    }

    #[test]
    fn removing_entries_restores_plain_click() {
        let mut f = fixture(2);
        add_menu(&mut f.row, 0, "Copy");
        f.row.show_sub_menu(ButtonHandle(0));
        f.row.button_mut(ButtonHandle(0)).unwrap().remove_all_sub_items();
        assert!(!f.row.buttons()[0].has_sub_menu());
        assert!(f.row.open_sub_menu_placement().is_none());

        let c = center_of(&f.row, 0);
        tap(&mut f.row, c);
        assert_eq!(f.clicks.borrow().len(), 1);
        assert!(!f.row.show_sub_menu(ButtonHandle(0)));
    }

    #[test]
    fn checked_entries_paint_a_mark() {
        let mut f = fixture(1);
        let entry = f
            .row
            .button_mut(ButtonHandle(0))
            .unwrap()
            .add_sub_item_with(1, IconId(0), "Mute", true, true);
        {
            let mut b = f.row.button_mut(ButtonHandle(0)).unwrap();
            b.set_sub_item_checked(entry, true).unwrap();
            let foreign = SubItemHandle { button: 3, entry: 0 };
            assert!(b.set_sub_item_checked(foreign, true).is_err());
        }
        f.row.show_sub_menu(ButtonHandle(0));

        let mut scene = Scene::new();
        f.row.paint_sub_menu(&mut scene);
        // panel + check mark, no icon (IconId(0) is missing)
        assert_eq!(count_rects(&scene), 2);
        assert!(!scene.nodes.iter().any(|n| matches!(n, SceneNode::Image { .. })));
        let items = f.row.sub_menu_semantics();
        assert_eq!(items.len(), 1);
        assert!(items[0].selected);
        assert_eq!(items[0].role, Role::MenuItem);
    }

    #[test]
    fn animation_drives_height() {
        let mut f = fixture(2);
        let t0 = Instant::now();
        f.row.animate_expansion(
            0.0,
            AnimationSpec::tween(Duration::from_millis(100), Easing::Linear),
            t0,
        );
        assert!(f.row.is_animating());
        assert!(f.row.tick(t0 + Duration::from_millis(50)));
        assert!(f.row.needs_layout());
        assert_eq!(f.row.measure(360.0).height, 38.0);
        assert!(!f.row.needs_layout());

        assert!(!f.row.tick(t0 + Duration::from_millis(150)));
        assert_eq!(f.row.expansion_progress(), 0.0);
        assert_eq!(f.row.measure(360.0).height, 20.0);
    }

    #[test]
    fn alpha_setters_clamp() {
        let mut f = fixture(1);
        f.row.set_background_alpha(3.0);
        f.row.set_disabled_content_alpha(-1.0);
        let s = f.row.state();
        assert_eq!(s.background_alpha, 1.0);
        assert_eq!(s.disabled_content_alpha, 0.0);
    }

    #[test]
    fn semantics_describe_buttons() {
        let mut f = fixture(2);
        add_menu(&mut f.row, 1, "More");
        f.row.show_sub_menu(ButtonHandle(1));
        let nodes = f.row.semantics();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].role, Role::Button);
        assert_eq!(nodes[0].label.as_deref(), Some("B0"));
        assert_eq!(nodes[1].role, Role::MenuButton);
        assert!(nodes[1].selected);
    }

    #[test]
    fn json_style_with_high_minimum_never_shrinks() {
        let mut f = fixture(1);
        let style: RowStyle = serde_json::from_str(r#"{ "min_height_dp": 80.0 }"#).unwrap();
        f.row.set_style(style);

        let mut prev = 0.0;
        for step in 0..=20 {
            f.row.set_expansion_progress(step as f32 / 20.0);
            let h = f.row.measure(360.0).height;
            assert!(h >= prev, "height dropped: {prev} -> {h}");
            prev = h;
        }
        assert_eq!(prev, 80.0);
    }

    #[test]
    fn oversized_margins_collapse_instead_of_overflowing() {
        let mut f = fixture(2);
        let style: RowStyle =
            serde_json::from_str(r#"{ "side_margin_dp": 2000000000.0 }"#).unwrap();
        f.row.set_style(style);
        f.row.measure(360.0);

        let g = f.row.geometry();
        assert_eq!(g.button_width, 0);
        assert!(!g.is_visible());

        let mut scene = Scene::new();
        f.row.paint(&mut scene);
        assert!(scene.is_empty());
        assert!(!f.row.handle_pointer(&PointerEvent::down(180.0, 20.0)));

        // unsanitized styles passed straight to the geometry behave the same
        let raw = RowStyle {
            side_margin_dp: 2.0e9,
            button_spacing_dp: 2.0e9,
            ..RowStyle::default()
        };
        let g = RowGeometry::compute(360, 5, 1.0, &raw);
        assert_eq!(g.button_width, 0);
        assert!(g.button_x(4) >= g.side_margin);
    }

    #[test]
    fn style_survives_json() {
        let style = RowStyle {
            min_height_dp: 0.0,
            content_color: Color::from_hex("#FF0000"),
            ..RowStyle::default()
        };
        let json = serde_json::to_string(&style).unwrap();
        let back: RowStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, style);
    }
}
