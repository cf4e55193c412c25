//! Built-in SKU codes shipped with the tool.

/// Product codes that have a dedicated action in the `TIN` action set.
pub const DEFAULT_IDS: &[&str] = &[
    "M001MT", "M002MT", "W013GZ", "W003MM", "W013LS", "M013MT", "W013LM", "W036MZ", "W003MN",
    "C013SS", "C012SS", "W003SS", "W034MW", "W011MW", "W011MR", "W033BM", "W011MB", "W013SS",
    "A012SS", "A010MZ", "W010MZ", "A012MS", "A013MS", "A037MS", "W013WZ", "W058MH", "M003MT",
    "A013BZ", "W034ML", "W010BM", "W010LZ", "A013WZ", "P013WZ", "A050DA", "A050DB", "A050DC",
    "C086MU", "M013ST", "A060MB", "A060MC", "A060ME", "A050DG", "A060MG", "A060MA", "A050CB",
    "A050CA", "A050AA", "A050AB", "A060MH", "A060MI", "P003OL", "M023AT", "M023BT", "M024BT",
    "M024CT", "M024MT", "M056MT", "M109AT", "M109MT", "M115MT", "W032BT", "W032BM", "W058MV",
    "W010MM", "A060MD", "M029MS", "W012TA", "W012TB", "W012TC", "A013SA", "W003LS", "A060AC",
    "W121MA", "W121MS", "A060ML",
];

/// Codes whose action comes in a landscape and a portrait flavour.
///
/// The portrait action is named after the code with a trailing `-`.
pub const ORIENTATION_SENSITIVE_IDS: &[&str] = &[
    "M001MT", "M002MT", "W011MW", "W011MB", "W058MH", "W011MR", "A060AC",
];

/// Suffix appended to an identifier to name its portrait action.
pub const PORTRAIT_SUFFIX: &str = "-";
