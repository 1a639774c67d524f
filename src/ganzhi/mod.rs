//! 干支四柱
//!
//! Note: 为方便处理诸多术语，本模块文档用中文。
//!
//! 依公历时刻推算年、月、日、时四柱干支。年柱取自农历年份（见 [`lunar`]），
//! 月柱以节气划分（见 [`solar_term`]），日柱、时柱为纯模算公式。
//! 各柱推算遵循同一参考算法，逐模一致，不做「修正」。

use chrono::{Datelike, Days, NaiveDateTime, Timelike};
use std::fmt::{Display, Formatter};
use tracing::trace;

use crate::error::Result;

pub mod fmt;
pub mod lunar;
pub mod solar_term;

pub use lunar::LunarDate;

/// 十天干。
pub const STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
/// 十二地支。
pub const BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// 月柱回溯查找分月节气的日数上限。
///
/// 参考算法的经验值；相邻两「节」最大间隔约 31 日，故必在界内命中。
const BOUNDARY_SEARCH_DAYS: u64 = 40;

/// 一柱干支，天干、地支各一字。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Pillar {
    pub stem: &'static str,
    pub branch: &'static str,
}

impl Display for Pillar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

/// 四柱，格式化为「X年 X月 X日 X时」。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl Display for FourPillars {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}年 {}月 {}日 {}时",
            self.year, self.month, self.day, self.hour
        )
    }
}

/// 干支推算器。
///
/// 输入为本地民用时刻（时区中立，调用方自行换算时区，惯例为东八区）。
/// 实例不含可变状态，各柱方法自行推算其依赖（月柱内部取年干、时柱内部
/// 取日干），任意顺序调用结果一致。
///
/// # 用例
///
/// ```
/// use chrono::NaiveDate;
/// use sizhu::GanZhi;
///
/// let time = NaiveDate::from_ymd_opt(2000, 1, 1)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
/// let gz = GanZhi::new(time);
///
/// assert_eq!(
///     "己卯年 丙子月 戊午日 壬子时",
///     gz.four_pillars().unwrap().to_string()
/// );
/// ```
#[derive(Debug, Copy, Clone)]
pub struct GanZhi {
    time: NaiveDateTime,
}

impl GanZhi {
    /// 以公历时刻构造推算器。
    pub fn new(time: NaiveDateTime) -> Self {
        Self { time }
    }

    /// 取得对应的农历日期。
    ///
    /// 日期超出月表范围或落于闰月内时报 [`crate::Error::UnsupportedDate`]。
    pub fn lunar_date(&self) -> Result<LunarDate> {
        lunar::from_civil(self.time.date())
    }

    /// 推算年柱。
    ///
    /// 农历年份减 3 再减 1（干支纪元先于公元纪年之故），模 10 取干、
    /// 模 12 取支。
    ///
    /// # 用例
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use sizhu::GanZhi;
    ///
    /// let time = NaiveDate::from_ymd_opt(1901, 2, 19)
    ///     .unwrap()
    ///     .and_hms_opt(0, 0, 0)
    ///     .unwrap();
    ///
    /// assert_eq!("辛丑", GanZhi::new(time).year_pillar().unwrap().to_string());
    /// ```
    pub fn year_pillar(&self) -> Result<Pillar> {
        let year = self.lunar_date()?.year - 4;
        Ok(Pillar {
            stem: STEMS[year.rem_euclid(10) as usize],
            branch: BRANCHES[year.rem_euclid(12) as usize],
        })
    }

    /// 推算月柱。
    ///
    /// 当日恰交「节」则直接采用其干支月序；否则自前一日起回溯至多
    /// 40 日，采用最近一个「节」。农历尚在腊月而节气已交立春时，
    /// 借次年年干起月。月干为「年干序加一乘二，再加月序加一」，
    /// 逢十进位；月支取自节气分月表。
    ///
    /// 精度为日级：同一日内立春时刻前后的两个时刻月柱相同，
    /// 此为参考算法的既知精度上限。
    pub fn month_pillar(&self) -> Result<Pillar> {
        let lunar = self.lunar_date()?;
        let date = self.time.date();

        let mut boundary = solar_term::term_on(date).and_then(solar_term::month_boundary);
        if boundary.is_none() {
            for back in 1..=BOUNDARY_SEARCH_DAYS {
                let Some(probe) = date.checked_sub_days(Days::new(back)) else {
                    break;
                };
                if let Some(found) =
                    solar_term::term_on(probe).and_then(solar_term::month_boundary)
                {
                    trace!(%date, %probe, days_back = back, "month boundary term found");
                    boundary = Some(found);
                    break;
                }
            }
        }
        let (month_index, branch) =
            boundary.expect("a month-boundary term occurs within 40 days of any date");

        // 腊月而已立春，月柱借次年之干起月
        let year_num = if month_index == 0 && lunar.month == 12 {
            lunar.year - 3
        } else {
            lunar.year - 4
        };
        let year_stem = year_num.rem_euclid(10) as usize;
        let month_num = (year_stem + 1) * 2 + month_index as usize + 1;
        Ok(Pillar {
            stem: STEMS[(month_num - 1) % 10],
            branch,
        })
    }

    /// 推算日柱。
    ///
    /// 世纪、年、月、日的经典模算公式，一、二月并入上一年的十三、
    /// 十四月。各加数为参考算法的规范常量。
    ///
    /// # 用例
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use sizhu::GanZhi;
    ///
    /// let time = NaiveDate::from_ymd_opt(2000, 1, 1)
    ///     .unwrap()
    ///     .and_hms_opt(0, 0, 0)
    ///     .unwrap();
    ///
    /// assert_eq!("戊午", GanZhi::new(time).day_pillar().to_string());
    /// ```
    pub fn day_pillar(&self) -> Pillar {
        let (stem, branch) = self.day_indices();
        Pillar {
            stem: STEMS[stem],
            branch: BRANCHES[branch],
        }
    }

    /// 推算时柱。
    ///
    /// 时支为「时数折半加 0.1 后取整」模 12，加 0.1 使整点恰在时辰
    /// 分界者一律进位；时干依日干序推得。
    pub fn hour_pillar(&self) -> Pillar {
        let branch_pos = ((self.time.hour() as f64 / 2.0 + 0.1).round() as usize) % 12;
        let day_stem_num = self.day_indices().0 + 1;
        let mut rem = day_stem_num % 5;
        if rem == 0 {
            rem = 5;
        }
        Pillar {
            stem: STEMS[(rem * 2 + branch_pos - 2) % 10],
            branch: BRANCHES[branch_pos],
        }
    }

    /// 推算四柱。
    ///
    /// # 用例
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use sizhu::GanZhi;
    ///
    /// let time = NaiveDate::from_ymd_opt(2024, 6, 1)
    ///     .unwrap()
    ///     .and_hms_opt(12, 0, 0)
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     "甲辰年 己巳月 丙申日 甲午时",
    ///     GanZhi::new(time).four_pillars().unwrap().to_string()
    /// );
    /// ```
    pub fn four_pillars(&self) -> Result<FourPillars> {
        Ok(FourPillars {
            year: self.year_pillar()?,
            month: self.month_pillar()?,
            day: self.day_pillar(),
            hour: self.hour_pillar(),
        })
    }

    /// 取得当日交节的节气名，当日无交节则为 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use sizhu::GanZhi;
    ///
    /// let time = NaiveDate::from_ymd_opt(2024, 2, 4)
    ///     .unwrap()
    ///     .and_hms_opt(10, 0, 0)
    ///     .unwrap();
    ///
    /// assert_eq!(Some("立春"), GanZhi::new(time).solar_term());
    /// ```
    pub fn solar_term(&self) -> Option<&'static str> {
        solar_term::term_on(self.time.date()).map(solar_term::name)
    }

    fn day_indices(&self) -> (usize, usize) {
        let date = self.time.date();
        let century = date.year().div_euclid(100);
        let mut year = date.year().rem_euclid(100);
        let mut month = date.month() as i32;
        if month <= 2 {
            year -= 1;
            month += 12;
        }
        let day = date.day() as i32;
        let parity = if month % 2 == 1 { 0 } else { 6 };

        let shared =
            century.div_euclid(4) + 5 * year + year.div_euclid(4) + (3 * (month + 1)).div_euclid(5) + day;
        let stem = (4 * century + shared - 4).rem_euclid(10);
        let branch = (8 * century + shared + 6 + parity).rem_euclid(12);
        (stem as usize, branch as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> GanZhi {
        GanZhi::new(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn reference_dates() {
        let dataset = [
            ((2000, 1, 1, 0), "己卯年 丙子月 戊午日 壬子时"),
            ((2024, 2, 4, 10), "癸卯年 丙寅月 戊戌日 丁巳时"),
            ((1901, 2, 19, 0), "辛丑年 庚寅月 戊辰日 壬子时"),
            ((2024, 6, 1, 12), "甲辰年 己巳月 丙申日 甲午时"),
        ];
        for ((y, m, d, h), std) in dataset {
            assert_eq!(
                std,
                at(y, m, d, h).four_pillars().unwrap().to_string(),
                "{y:04}-{m:02}-{d:02} {h:02}:00"
            );
        }
    }

    #[test]
    fn pillar_vocabulary() {
        for day in 1..=28 {
            let full = at(2024, 9, day, 6).four_pillars().unwrap();
            for pillar in [full.year, full.month, full.day, full.hour] {
                assert!(STEMS.contains(&pillar.stem));
                assert!(BRANCHES.contains(&pillar.branch));
            }
        }
    }

    #[test]
    fn fresh_instances_agree() {
        let a = at(2024, 6, 1, 12).four_pillars().unwrap();
        let b = at(2024, 6, 1, 12).four_pillars().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn pillars_standalone() {
        // 单独调用与聚合调用结果一致，无次序依赖
        let gz = at(2024, 2, 4, 10);
        let full = gz.four_pillars().unwrap();
        assert_eq!(full.month, at(2024, 2, 4, 10).month_pillar().unwrap());
        assert_eq!(full.hour, at(2024, 2, 4, 10).hour_pillar());
    }

    #[test]
    fn new_year_advances_on_early_spring_term() {
        // 2024-02-04 立春而农历尚在腊月：年柱未变，月柱已借甲辰年之干
        let gz = at(2024, 2, 4, 10);
        assert_eq!("癸卯", gz.year_pillar().unwrap().to_string());
        assert_eq!("丙寅", gz.month_pillar().unwrap().to_string());
        // 前一日仍为腊月乙丑月
        assert_eq!("乙丑", at(2024, 2, 3, 10).month_pillar().unwrap().to_string());
    }

    #[test]
    fn boundary_day_is_day_granular() {
        // 立春当日不分时刻，整日同月柱（参考算法的精度上限）
        assert_eq!(
            at(2024, 2, 4, 0).month_pillar().unwrap(),
            at(2024, 2, 4, 23).month_pillar().unwrap()
        );
    }

    #[test]
    fn hour_branches() {
        let dataset = [
            (0, "子"),
            (1, "丑"),
            (2, "丑"),
            (3, "寅"),
            (11, "午"),
            (12, "午"),
            (22, "亥"),
            (23, "子"),
        ];
        for (hour, branch) in dataset {
            assert_eq!(branch, at(2024, 6, 1, hour).hour_pillar().branch, "{hour}");
        }
    }

    #[test]
    fn unsupported_dates_propagate() {
        for (y, m, d) in [(1900, 12, 31), (2023, 4, 1), (2051, 6, 1)] {
            let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            assert_eq!(
                Err(Error::UnsupportedDate(date)),
                at(y, m, d, 0).four_pillars()
            );
        }
    }
}
