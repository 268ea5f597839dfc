//! Operator names understood by the graphics handler.
//!
//! The PostScript interpreter reports every drawing operator it executes
//! together with its numeric operands. `Operator::from_name` maps the
//! reported name to the handler operation.

/// Graphics operators reported by the PostScript interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Path construction
    Moveto,
    Lineto,
    Curveto,
    Closepath,
    Newpath,
    Querypos,

    // Painting
    Stroke,
    Fill,
    Eofill,
    Shfill,

    // Clipping
    Clip,
    Eoclip,
    Clippath,
    Initclip,

    // Graphics state stack
    Gsave,
    Grestore,
    Grestoreall,
    Save,
    Restore,

    // Transformations
    Setmatrix,
    Scale,
    Translate,
    Rotate,
    Applyscalevals,

    // Color and line style
    Setgray,
    Setrgbcolor,
    Setcmykcolor,
    Sethsbcolor,
    Setlinewidth,
    Setlinecap,
    Setlinejoin,
    Setmiterlimit,
    Setdash,
    Setopacityalpha,

    // Patterns
    Makepattern,
    Setpattern,

    // Isolated groups
    Begingroup,
    Endgroup,
}

impl Operator {
    /// Looks up an operator by the name the interpreter reports.
    pub fn from_name(name: &str) -> Option<Self> {
        let op = match name {
            "moveto" => Operator::Moveto,
            "lineto" => Operator::Lineto,
            "curveto" => Operator::Curveto,
            "closepath" => Operator::Closepath,
            "newpath" => Operator::Newpath,
            "querypos" => Operator::Querypos,
            "stroke" => Operator::Stroke,
            "fill" => Operator::Fill,
            "eofill" => Operator::Eofill,
            "shfill" => Operator::Shfill,
            "clip" => Operator::Clip,
            "eoclip" => Operator::Eoclip,
            "clippath" => Operator::Clippath,
            "initclip" => Operator::Initclip,
            "gsave" => Operator::Gsave,
            "grestore" => Operator::Grestore,
            "grestoreall" => Operator::Grestoreall,
            "save" => Operator::Save,
            "restore" => Operator::Restore,
            "setmatrix" => Operator::Setmatrix,
            "scale" => Operator::Scale,
            "translate" => Operator::Translate,
            "rotate" => Operator::Rotate,
            "applyscalevals" => Operator::Applyscalevals,
            "setgray" => Operator::Setgray,
            "setrgbcolor" => Operator::Setrgbcolor,
            "setcmykcolor" => Operator::Setcmykcolor,
            "sethsbcolor" => Operator::Sethsbcolor,
            "setlinewidth" => Operator::Setlinewidth,
            "setlinecap" => Operator::Setlinecap,
            "setlinejoin" => Operator::Setlinejoin,
            "setmiterlimit" => Operator::Setmiterlimit,
            "setdash" => Operator::Setdash,
            "setopacityalpha" => Operator::Setopacityalpha,
            "makepattern" => Operator::Makepattern,
            "setpattern" => Operator::Setpattern,
            "begingroup" => Operator::Begingroup,
            "endgroup" => Operator::Endgroup,
            _ => return None,
        };
        Some(op)
    }

    /// Name of the operator as reported by the interpreter.
    pub const fn name(self) -> &'static str {
        match self {
            Operator::Moveto => "moveto",
            Operator::Lineto => "lineto",
            Operator::Curveto => "curveto",
            Operator::Closepath => "closepath",
            Operator::Newpath => "newpath",
            Operator::Querypos => "querypos",
            Operator::Stroke => "stroke",
            Operator::Fill => "fill",
            Operator::Eofill => "eofill",
            Operator::Shfill => "shfill",
            Operator::Clip => "clip",
            Operator::Eoclip => "eoclip",
            Operator::Clippath => "clippath",
            Operator::Initclip => "initclip",
            Operator::Gsave => "gsave",
            Operator::Grestore => "grestore",
            Operator::Grestoreall => "grestoreall",
            Operator::Save => "save",
            Operator::Restore => "restore",
            Operator::Setmatrix => "setmatrix",
            Operator::Scale => "scale",
            Operator::Translate => "translate",
            Operator::Rotate => "rotate",
            Operator::Applyscalevals => "applyscalevals",
            Operator::Setgray => "setgray",
            Operator::Setrgbcolor => "setrgbcolor",
            Operator::Setcmykcolor => "setcmykcolor",
            Operator::Sethsbcolor => "sethsbcolor",
            Operator::Setlinewidth => "setlinewidth",
            Operator::Setlinecap => "setlinecap",
            Operator::Setlinejoin => "setlinejoin",
            Operator::Setmiterlimit => "setmiterlimit",
            Operator::Setdash => "setdash",
            Operator::Setopacityalpha => "setopacityalpha",
            Operator::Makepattern => "makepattern",
            Operator::Setpattern => "setpattern",
            Operator::Begingroup => "begingroup",
            Operator::Endgroup => "endgroup",
        }
    }

    /// Minimum number of operands the operator needs.
    ///
    /// `setmatrix` and `endgroup` fill missing matrix components from the
    /// identity, `newpath` defaults to a non-drawing call and `shfill`
    /// ignores short operand lists itself.
    pub const fn min_operands(self) -> usize {
        match self {
            Operator::Curveto => 6,
            Operator::Setcmykcolor => 4,
            Operator::Setrgbcolor | Operator::Sethsbcolor | Operator::Applyscalevals => 3,
            Operator::Moveto
            | Operator::Lineto
            | Operator::Querypos
            | Operator::Scale
            | Operator::Translate
            | Operator::Makepattern => 2,
            Operator::Save
            | Operator::Restore
            | Operator::Rotate
            | Operator::Setgray
            | Operator::Setlinewidth
            | Operator::Setlinecap
            | Operator::Setlinejoin
            | Operator::Setmiterlimit
            | Operator::Setdash
            | Operator::Setopacityalpha
            | Operator::Setpattern => 1,
            _ => 0,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Operator::from_name("moveto"), Some(Operator::Moveto));
        assert_eq!(Operator::from_name("eoclip"), Some(Operator::Eoclip));
        assert_eq!(Operator::from_name("show"), None);
        assert_eq!(Operator::from_name("Moveto"), None);
    }

    #[test]
    fn test_name_round_trip() {
        for op in [
            Operator::Shfill,
            Operator::Grestoreall,
            Operator::Setopacityalpha,
            Operator::Endgroup,
        ] {
            assert_eq!(Operator::from_name(op.name()), Some(op));
        }
    }

    #[test]
    fn test_min_operands() {
        assert_eq!(Operator::Curveto.min_operands(), 6);
        assert_eq!(Operator::Setmatrix.min_operands(), 0);
        assert_eq!(Operator::Shfill.min_operands(), 0);
        assert_eq!(Operator::Makepattern.min_operands(), 2);
    }
}
