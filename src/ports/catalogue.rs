use super::PortKind;
use crate::graph::NodeKind;

/// A port every node of a given kind has, independent of its fields.
pub(super) struct PortSpec {
    pub suffix: &'static str,
    pub kind: PortKind,
    pub offset: f64,
}

/// Builds the static port table. Each entry is `(suffix, Source|Target, offset)`.
macro_rules! define_port_catalogue {
    ( $( $kind:ident => [ $( ($suffix:expr, $port_kind:ident, $offset:expr) ),* $(,)? ] ),* $(,)? ) => {
        pub(super) fn static_port_specs(kind: &NodeKind) -> &'static [PortSpec] {
            match kind {
                $(
                    NodeKind::$kind => &[
                        $( PortSpec { suffix: $suffix, kind: PortKind::$port_kind, offset: $offset }, )*
                    ],
                )*
                NodeKind::Other(_) => &[],
            }
        }
    };
}

define_port_catalogue! {
    Input => [("value", Source, 0.5)],
    Output => [("value", Target, 0.5)],
    Llm => [
        ("system", Target, 0.33),
        ("prompt", Target, 0.67),
        ("response", Source, 0.5),
    ],
    // Text inputs are derived from the template; only the output is fixed.
    Text => [("output", Source, 0.5)],
    Math => [
        ("a", Target, 0.30),
        ("b", Target, 0.70),
        ("out", Source, 0.5),
    ],
    Merge => [
        ("in1", Target, 0.35),
        ("in2", Target, 0.70),
        ("out", Source, 0.5),
    ],
    Condition => [
        ("in", Target, 0.5),
        ("true", Source, 0.35),
        ("false", Source, 0.75),
    ],
    Delay => [("in", Target, 0.5), ("out", Source, 0.5)],
    Note => [],
}
