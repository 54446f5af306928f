//! Wall clock

use jiff::civil::DateTime;
use jiff::Zoned;

/// Current local date and time
pub fn now() -> DateTime {
    Zoned::now().datetime()
}
