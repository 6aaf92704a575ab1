//! Named tunables that elsewhere would be configuration; here they are load-bearing
//! constants of the wire format rather than anything an application can reasonably vary.

/// Maximum payload size of an array element, per the Matter MRP (message reliability
/// protocol) packet-size limit.
pub const ARRAY_MAX_OCTETS: usize = 1280;
