//! 公历转农历
//!
//! 采用预制的逐年压缩月表编算农历，支持公历 1901-01-01 至 2050 年末。
//! 表首前 49 日（1901-02-19 农历新年之前）落在 1900 年的冬月、腊月，单独处理。

use chrono::NaiveDate;
use std::fmt;
use tracing::debug;

use crate::error::{Error, Result};
use crate::ganzhi::fmt as cfmt;

/// 月表起始公历年份。
pub(crate) const EPOCH_YEAR: i32 = 1901;

/// 逐年农历月长表，每年一个压缩字。
///
/// 自最高位（bit 15）起，第 `n` 位记第 `n+1` 个农历月为大月（30 日）还是
/// 小月（29 日）；有闰月之年，闰月长度记于其所闰之月的次一位。
/// 表为预算好的事实数据，不可推导。
const MONTH_TABLE: [u16; 150] = [
    0x4ae0, 0xa570, 0x5268, 0xd260, 0xd950, 0x6aa8, 0x56a0, 0x9ad0, 0x4ae8, 0x4ae0, // 1901-1910
    0xa4d8, 0xa4d0, 0xd250, 0xd548, 0xb550, 0x56a0, 0x96d0, 0x95b0, 0x49b8, 0x49b0, // 1911-1920
    0xa4b0, 0xb258, 0x6a50, 0x6d40, 0xada8, 0x2b60, 0x9570, 0x4978, 0x4970, 0x64b0, // 1921-1930
    0xd4a0, 0xea50, 0x6d48, 0x5ad0, 0x2b60, 0x9370, 0x92e0, 0xc968, 0xc950, 0xd4a0, // 1931-1940
    0xda50, 0xb550, 0x56a0, 0xaad8, 0x25d0, 0x92d0, 0xc958, 0xa950, 0xb4a8, 0x6ca0, // 1941-1950
    0xb550, 0x55a8, 0x4da0, 0xa5b0, 0x52b8, 0x52b0, 0xa950, 0xe950, 0x6aa0, 0xad50, // 1951-1960
    0xab50, 0x4b60, 0xa570, 0xa570, 0x5260, 0xe930, 0xd950, 0x5aa8, 0x56a0, 0x96d0, // 1961-1970
    0x4ae8, 0x4ad0, 0xa4d0, 0xd268, 0xd250, 0xd528, 0xb540, 0xb6a0, 0x96d0, 0x95b0, // 1971-1980
    0x49b0, 0xa4b8, 0xa4b0, 0xb258, 0x6a50, 0x6d40, 0xada0, 0xab60, 0x9370, 0x4978, // 1981-1990
    0x4970, 0x64b0, 0x6a50, 0xea50, 0x6b28, 0x5ac0, 0xab60, 0x9368, 0x92e0, 0xc960, // 1991-2000
    0xd4a8, 0xd4a0, 0xda50, 0x5aa8, 0x56a0, 0xaad8, 0x25d0, 0x92d0, 0xc958, 0xa950, // 2001-2010
    0xb4a0, 0xb550, 0xb550, 0x55a8, 0x4ba0, 0xa5b0, 0x52b8, 0x52b0, 0xa930, 0x74a8, // 2011-2020
    0x6aa0, 0xad50, 0x4da8, 0x4b60, 0x9570, 0xa4e0, 0xd260, 0xe930, 0xd530, 0x5aa0, // 2021-2030
    0x6b50, 0x96d0, 0x4ae8, 0x4ad0, 0xa4d0, 0xd258, 0xd250, 0xd520, 0xdaa0, 0xb5a0, // 2031-2040
    0x56d0, 0x4ad8, 0x49b0, 0xa4b8, 0xa4b0, 0xaa50, 0xb528, 0x6d20, 0xada0, 0x55b0, // 2041-2050
];

/// 闰月表，每字节记两年：高半字节为偶数年距、低半字节为奇数年距，
/// 值为所闰之月（1-12），0 表示无闰。
const LEAP_TABLE: [u8; 75] = [
    0x00, 0x50, 0x04, 0x00, 0x20, // 1901-1910
    0x60, 0x05, 0x00, 0x20, 0x70, // 1911-1920
    0x05, 0x00, 0x40, 0x02, 0x06, // 1921-1930
    0x00, 0x50, 0x03, 0x07, 0x00, // 1931-1940
    0x60, 0x04, 0x00, 0x20, 0x70, // 1941-1950
    0x05, 0x00, 0x30, 0x80, 0x06, // 1951-1960
    0x00, 0x40, 0x03, 0x07, 0x00, // 1961-1970
    0x50, 0x04, 0x08, 0x00, 0x60, // 1971-1980
    0x04, 0x0a, 0x00, 0x60, 0x05, // 1981-1990
    0x00, 0x30, 0x80, 0x05, 0x00, // 1991-2000
    0x40, 0x02, 0x07, 0x00, 0x50, // 2001-2010
    0x04, 0x09, 0x00, 0x60, 0x04, // 2011-2020
    0x00, 0x20, 0x60, 0x05, 0x00, // 2021-2030
    0x30, 0xb0, 0x06, 0x00, 0x50, // 2031-2040
    0x02, 0x07, 0x00, 0x50, 0x03, // 2041-2050
];

/// 农历日期。
///
/// # 用例
///
/// ```
/// use chrono::NaiveDate;
/// use sizhu::GanZhi;
///
/// let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
/// let lunar = GanZhi::new(date.and_hms_opt(0, 0, 0).unwrap())
///     .lunar_date()
///     .unwrap();
///
/// assert_eq!((1999, 11, 25), (lunar.year, lunar.month, lunar.day));
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LunarDate {
    /// 农历年份
    pub year: i32,
    /// 月序，1-12（闰月内的日期会在换算时被拒绝，故无闰月表示）
    pub month: u32,
    /// 日序，1-30
    pub day: u32,
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}年{}{}",
            self.year,
            cfmt::month(self.month),
            cfmt::day(self.day)
        )
    }
}

/// 取得 `year` 年所闰之月，无闰为 0。
fn leap_month(year: i32) -> u32 {
    let offset = year - EPOCH_YEAR;
    let flag = LEAP_TABLE[(offset / 2) as usize];
    if offset % 2 == 1 {
        (flag & 0x0f) as u32
    } else {
        (flag >> 4) as u32
    }
}

/// 取得 `year` 年第 `month` 个农历月的日数，返回 `(闰月日数, 本月日数)`。
///
/// 该月非闰月时首项为 0。
fn month_days(year: i32, month: u32) -> (u32, u32) {
    let leap = leap_month(year);
    let mut bit = 16 - month;
    if leap != 0 && month > leap {
        bit -= 1;
    }
    let packed = MONTH_TABLE[(year - EPOCH_YEAR) as usize];
    let common = if packed & (1u16 << bit) != 0 { 30 } else { 29 };
    let leap_days = if month == leap {
        if packed & (1u16 << (bit - 1)) != 0 { 30 } else { 29 }
    } else {
        0
    };
    (leap_days, common)
}

/// 取得 `year` 农历年的总日数，含闰月。
fn year_days(year: i32) -> u32 {
    (1..=12)
        .map(|m| {
            let (leap, common) = month_days(year, m);
            leap + common
        })
        .sum()
}

/// 公历转农历。
///
/// 自 1901-01-01 起算日差；前 49 日落于 1900 年冬月、腊月，之后自
/// 1901 年正月初一起逐年、逐月扣减。
///
/// 日期落在闰月内时无法给出干支月名（参考算法以哨兵值报告该情形），
/// 此处与超出表界的日期一样报 [`Error::UnsupportedDate`]。
pub(crate) fn from_civil(date: NaiveDate) -> Result<LunarDate> {
    let epoch = NaiveDate::from_ymd_opt(EPOCH_YEAR, 1, 1).unwrap();
    let offset = (date - epoch).num_days();
    if offset < 0 {
        debug!(%date, "date precedes lunar table epoch");
        return Err(Error::UnsupportedDate(date));
    }
    if offset < 49 {
        // 1901-02-19 为农历 1901 年正月初一，此前属 1900 年
        let year = EPOCH_YEAR - 1;
        return Ok(if offset < 19 {
            LunarDate {
                year,
                month: 11,
                day: 11 + offset as u32,
            }
        } else {
            LunarDate {
                year,
                month: 12,
                day: offset as u32 - 18,
            }
        });
    }

    let mut days = offset as u32 - 49;
    let mut year = EPOCH_YEAR;
    loop {
        if (year - EPOCH_YEAR) as usize >= MONTH_TABLE.len() {
            debug!(%date, "date exceeds lunar table range");
            return Err(Error::UnsupportedDate(date));
        }
        let total = year_days(year);
        if days < total {
            break;
        }
        days -= total;
        year += 1;
    }

    let mut month = 1;
    loop {
        let (_, common) = month_days(year, month);
        if days < common {
            break;
        }
        days -= common;
        if month == leap_month(year) {
            let (leap, _) = month_days(year, month);
            if days < leap {
                debug!(%date, year, month, "date falls inside leap month");
                return Err(Error::UnsupportedDate(date));
            }
            days -= leap;
        }
        month += 1;
    }

    Ok(LunarDate {
        year,
        month,
        day: days + 1,
    })
}
