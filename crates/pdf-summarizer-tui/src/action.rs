/// A user intent, decoded from terminal input by [`crate::input::map_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Tick,
    Resize(u16, u16),

    // Navigation
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoTop,
    GoBottom,
    DrillIn,
    NavigateBack,

    // Controls
    LoadPdf,
    EditLength,
    CycleModel,
    Summarize,
    Export,
    ToggleTheme,
    ToggleHelp,

    // Prompt answers
    Yes,
    No,

    // Text input
    TextInput(char),
    Backspace,
    Confirm,
    Cancel,
}
