//! The buffer splice engine.
//!
//! All mutation funnels through [`Url::splice`], which opens a hole
//! over a contiguous run of component regions and shifts the suffix
//! of the buffer, including the trailing NUL, in one pass. Callers
//! validate input and check sizes *before* the first splice, so a
//! failed operation leaves the container untouched.

use super::{parts::id, Url};
use crate::{
    error::{Error, Result},
    parser::MAX_LENGTH,
};

impl Url {
    /// Checks that growing the URL by at most `added` bytes stays
    /// within the maximum length.
    pub(crate) fn grow_check(&self, added: usize) -> Result<()> {
        if self.len().saturating_add(added) > MAX_LENGTH {
            Err(Error::TooLarge)
        } else {
            Ok(())
        }
    }

    /// Replaces the byte range spanned by components `first..last`
    /// with a hole of `new_len` bytes and returns the hole for
    /// writing.
    ///
    /// Offsets of components inside the range collapse to the end of
    /// the hole; the caller lowers them afterwards if it wrote more
    /// than one region. Offsets from `last` on, including the end
    /// offset, shift by the net delta.
    pub(crate) fn splice(&mut self, first: usize, last: usize, new_len: usize) -> &mut [u8] {
        debug_assert!(first < last && last <= id::END);
        if self.buf.is_empty() {
            self.buf.push(0);
        }
        let start = self.parts.offset[first];
        let end = self.parts.offset[last];
        let old_len = end - start;
        let total = self.buf.len();

        if new_len > old_len {
            let delta = new_len - old_len;
            self.buf.resize(total + delta, 0);
            self.buf.copy_within(end..total, end + delta);
            for i in last..=id::END {
                self.parts.offset[i] += delta;
            }
        } else {
            let delta = old_len - new_len;
            self.buf.copy_within(end..total, end - delta);
            self.buf.truncate(total - delta);
            for i in last..=id::END {
                self.parts.offset[i] -= delta;
            }
        }
        for i in first + 1..last {
            self.parts.offset[i] = start + new_len;
        }
        &mut self.buf[start..start + new_len]
    }

    /// Inserts `prefix` at the start of a component region, keeping
    /// the region's contents.
    pub(crate) fn prepend(&mut self, comp: usize, prefix: &[u8]) {
        let old = self.parts.len(comp);
        let region = self.splice(comp, comp + 1, old + prefix.len());
        region.copy_within(..old, prefix.len());
        region[..prefix.len()].copy_from_slice(prefix);
    }

    /// Removes the first `n` bytes of a component region.
    pub(crate) fn strip_prefix(&mut self, comp: usize, n: usize) {
        let start = self.parts.start(comp);
        let end = self.parts.end(comp);
        self.buf.copy_within(start + n..end, start);
        self.splice(comp, comp + 1, end - start - n);
    }

    /// Checks the structural invariants of the buffer and table.
    /// Meant for `debug_assert!` after a mutation.
    pub(crate) fn invariants_hold(&self) -> bool {
        let o = &self.parts.offset;
        if o[0] != 0 || (0..id::END).any(|i| o[i] > o[i + 1]) {
            return false;
        }
        let len = o[id::END];
        if self.buf.is_empty() {
            return len == 0 && o.iter().all(|&x| x == 0);
        }
        if self.buf.len() != len + 1 || self.buf[len] != 0 {
            return false;
        }

        let region = |i: usize| &self.buf[o[i]..o[i + 1]];
        let scheme = region(id::SCHEME);
        if !scheme.is_empty() && scheme.last() != Some(&b':') {
            return false;
        }
        let user = region(id::USER);
        if !user.is_empty() && !user.starts_with(b"//") {
            return false;
        }
        let pass = region(id::PASS);
        let pass_ok = pass.is_empty()
            || (pass.last() == Some(&b'@') && (pass.len() == 1 || pass[0] == b':'));
        if !pass_ok {
            return false;
        }
        let port = region(id::PORT);
        if !port.is_empty() && (port[0] != b':' || !port[1..].iter().all(u8::is_ascii_digit)) {
            return false;
        }
        // Userinfo, host, and port require an authority.
        if user.len() < 2
            && (!pass.is_empty() || !region(id::HOST).is_empty() || !port.is_empty())
        {
            return false;
        }
        let query = region(id::QUERY);
        if !query.is_empty() && query[0] != b'?' {
            return false;
        }
        let fragment = region(id::FRAGMENT);
        if !fragment.is_empty() && fragment[0] != b'#' {
            return false;
        }
        true
    }
}
