use bevy::prelude::*;

use super::components::*;
use super::resources::SceneRes;

pub(crate) const FIELD_IDLE: Color = Color::srgb(0.12, 0.12, 0.12);
pub(crate) const FIELD_FOCUSED: Color = Color::srgb(0.2, 0.2, 0.26);
pub(crate) const BUTTON_IDLE: Color = Color::srgb(0.22, 0.22, 0.22);
pub(crate) const BUTTON_HOVERED: Color = Color::srgb(0.3, 0.3, 0.3);
pub(crate) const BUTTON_PRESSED: Color = Color::srgb(0.38, 0.38, 0.38);
const NOTICE_BG: Color = Color::srgb(0.6, 0.08, 0.08);

fn text(value: impl Into<String>) -> (Text, TextFont, TextColor) {
    (
        Text::new(value),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::WHITE),
    )
}

fn button_node() -> Node {
    Node {
        padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

pub fn setup_ui(mut commands: Commands, scene: Res<SceneRes>) {
    let state = &scene.0;

    let panel = commands
        .spawn((
            UiPanel,
            Interaction::default(),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
        ))
        .id();

    let row = commands
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            column_gap: Val::Px(6.0),
            ..default()
        })
        .id();

    let field = commands
        .spawn((
            FunctionField::default(),
            Button,
            Node {
                width: Val::Px(240.0),
                padding: UiRect::axes(Val::Px(8.0), Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(FIELD_IDLE),
        ))
        .with_children(|p| {
            p.spawn((FunctionFieldText, text(state.input())));
        })
        .id();

    let plot = commands
        .spawn((PlotButton, Button, button_node(), BackgroundColor(BUTTON_IDLE)))
        .with_children(|p| {
            p.spawn(text("Plot"));
        })
        .id();

    let toggle = commands
        .spawn((ToggleButton, Button, button_node(), BackgroundColor(BUTTON_IDLE)))
        .with_children(|p| {
            p.spawn((ToggleCaption, text(state.toggle_caption())));
        })
        .id();

    let notice = commands
        .spawn((
            NoticeBanner,
            Node {
                display: Display::None,
                padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(NOTICE_BG),
        ))
        .with_children(|p| {
            p.spawn((NoticeText, text("")));
        })
        .id();

    commands.entity(row).add_children(&[field, plot]);
    commands.entity(panel).add_children(&[row, toggle, notice]);
}
