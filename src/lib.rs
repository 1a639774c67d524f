//! Sexagenary (ganzhi) four-pillar timestamps and xiaoliuren divination
//! phrases for divination prompts.
//!
//! The four-pillar calculation converts a civil wall-clock time into its
//! traditional Chinese calendar representation: a stem-branch pair each for
//! the year, month, day and hour. The conversion is table-driven (packed
//! lunar month tables covering 1901 through 2050) and reproduces one specific
//! published algorithm exactly, since the output is a user-facing cultural
//! artifact where any deviation is a correctness bug.
//!
//! All input times are timezone-naive; callers apply their own timezone
//! shift first (Chinese civil time, UTC+8, by convention).
//!
//! # Examples
//!
//! Four pillars of a civil time:
//!
//! ```
//! use chrono::NaiveDate;
//! use sizhu::GanZhi;
//!
//! let time = NaiveDate::from_ymd_opt(2024, 6, 1)
//!     .unwrap()
//!     .and_hms_opt(12, 0, 0)
//!     .unwrap();
//! let gz = GanZhi::new(time);
//!
//! assert_eq!(
//!     "甲辰年 己巳月 丙申日 甲午时",
//!     gz.four_pillars().unwrap().to_string()
//! );
//! assert_eq!("2024年四月廿五", gz.lunar_date().unwrap().to_string());
//! ```
//!
//! A xiaoliuren hexagram from three caller-supplied numbers:
//!
//! ```
//! use sizhu::hexagram;
//!
//! assert_eq!("速喜 空亡 赤口", hexagram::generate(&[3, 4, 5]).unwrap());
//! ```

pub mod error;
pub mod ganzhi;
pub mod hexagram;
pub mod text;

pub use error::{Error, Result};
pub use ganzhi::{FourPillars, GanZhi, LunarDate, Pillar};
