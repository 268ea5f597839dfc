//! Clipping operators.
//!
//! Handles: clip, eoclip, clippath, initclip
//!
//! Every clip path becomes a `<clipPath id="clipN">` definition. Nested
//! clips are either intersected geometrically or expressed by letting the
//! new `clipPath` reference the previous one, depending on
//! `ConversionParams::compute_clip_intersections`. Intersections without
//! overlap produce an empty `clipPath`.

use crate::interp::handler::PsGraphicsHandler;
use crate::path::{GraphicsPath, WindingRule};
use crate::svg::{SvgDevice, XmlElement};

impl<'a, D: SvgDevice> PsGraphicsHandler<'a, D> {
    /// Intersects the clip path with the current path. The current path is
    /// kept.
    ///
    /// PostScript operators: `clip` (nonzero), `eoclip` (even-odd)
    pub fn do_clip(&mut self, evenodd: bool) {
        self.path.remove_redundant_commands();
        let path = self.path.clone();
        self.clip_path(path, evenodd);
    }

    /// Loads the clip path into the current path.
    ///
    /// The clip path is prepended to the path painted next.
    ///
    /// PostScript operator: `clippath`
    pub fn do_clippath(&mut self) {
        if !self.clip_stack.is_empty() {
            self.clip_stack.set_clippath_loaded(true);
            self.path.clear();
        }
    }

    /// Removes the clip path of the current frame.
    ///
    /// PostScript operator: `initclip`
    pub fn do_initclip(&mut self) {
        self.clip_stack.push_empty_path();
    }

    /// Restricts the clip region to `path` given in user space.
    pub(crate) fn clip_path(&mut self, mut path: GraphicsPath, evenodd: bool) {
        path.remove_redundant_commands();
        if path.is_empty() {
            return;
        }
        let rule = WindingRule::from_evenodd(evenodd);
        path.set_winding_rule(rule);
        path.transform(self.graphicstate.ctm);

        let old_id = self.clip_stack.top_id();
        let intersect = self.params.compute_clip_intersections;
        let clip = match self.clip_stack.path(old_id) {
            Some(old) if intersect => self.intersector.intersect(old, &path, rule),
            _ => path,
        };
        // an empty intersection stays in effect and hides everything
        if clip.is_empty() {
            self.clip_stack.replace_empty_region();
        } else {
            self.clip_stack.replace(&clip);
        }
        let new_id = self.clip_stack.top_id();

        let mut clip_elem = XmlElement::new("clipPath");
        clip_elem.set_attribute("id", format!("clip{new_id}"));
        if old_id > 0 && !intersect {
            clip_elem.set_attribute("clip-path", format!("url(#clip{old_id})"));
        }
        if !clip.is_empty() {
            let mut path_elem = XmlElement::new("path");
            path_elem.set_attribute("d", clip.to_svg(self.params.path_format));
            if evenodd {
                path_elem.set_attribute("clip-rule", "evenodd");
            }
            clip_elem.append(path_elem);
        }
        tracing::trace!(clip = new_id, previous = old_id, "defining clip path");
        self.device.append_to_defs(clip_elem);
    }
}
