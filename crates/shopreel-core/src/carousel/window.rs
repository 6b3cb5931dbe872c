//! Index arithmetic for the looping window
//!
//! Pure functions shared by the carousel state machine and its tests.

/// Whether a list of `len` items scrolls at all when `visible` are shown at once
#[inline]
pub fn loops(len: usize, visible: usize) -> bool {
    len > visible
}

/// Build the strip the window slides over: tail clone, full list, head clone.
///
/// For `len > visible` the result is `items[len-visible..] ++ items ++ items[..visible]`,
/// so moving the cursor by exactly `len` positions shows the same items.
/// Shorter lists are returned unchanged.
pub fn extend_circular<T: Clone>(items: &[T], visible: usize) -> Vec<T> {
    let len = items.len();
    if !loops(len, visible) {
        return items.to_vec();
    }

    let mut extended = Vec::with_capacity(len + 2 * visible);
    extended.extend_from_slice(&items[len - visible..]);
    extended.extend_from_slice(items);
    extended.extend_from_slice(&items[..visible]);
    extended
}

/// Horizontal translation, in percent of the viewport, for a cursor position
#[inline]
pub fn offset_percent(index: usize, visible: usize) -> f64 {
    if visible == 0 {
        return 0.0;
    }
    index as f64 * (100.0 / visible as f64)
}

/// Bring a cursor carried over from an older list back into the real region
/// `[visible, len + visible - 1]` of a new one, resetting to `visible` when it falls outside.
pub fn clamp_index(index: usize, len: usize, visible: usize) -> usize {
    if !loops(len, visible) {
        return 0;
    }
    if (visible..len + visible).contains(&index) {
        index
    } else {
        visible
    }
}

/// Where a cursor sitting on a cloned boundary has to jump, if anywhere
#[inline]
pub fn snap_target(index: usize, len: usize, visible: usize) -> Option<usize> {
    if !loops(len, visible) {
        None
    } else if index == len + visible {
        Some(visible)
    } else if index == 0 {
        Some(len)
    } else {
        None
    }
}
