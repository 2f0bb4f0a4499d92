//! 月相節氣曆表
//!
//! 不再依賴預製數據，改以 Meeus《Astronomical Algorithms》中的公式推算：
//!
//! - 太陽視黃經取第 25 章低精度公式（誤差約 0.01°，合十餘分鐘），節氣時刻以牛頓迭代求得；
//! - 朔日取第 49 章平朔加週期項修正（誤差在一分鐘內）。
//!
//! 推得的時刻均為 TDB，換算日期時須經 [`Ut::convert`](crate::time_scales::Ut::convert)。
//! 交節、合朔距北京時間子夜僅數分鐘者可能差一日，此為已知局限。
//! 與香港天文台 1901–2099 年數據逐日比對，1914-11-17、1916-02-03、1920-11-10
//! 三個月首相差一日，其中 1916 年春節應在 2 月 4 日。

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::time_scales::Tdb;

/// 曆表支持的首歲
pub const FIRST_ANNUS: i32 = 1900;
/// 曆表支持的末歲
pub const LAST_ANNUS: i32 = 2100;

const J2000: f64 = 2451545.0;
const TROPICAL_YEAR: f64 = 365.2422;
const SYNODIC_MONTH: f64 = 29.530588861;
/// 2000 年 1 月 6 日平朔（k = 0）
const NEW_MOON_EPOCH: f64 = 2451550.09766;
/// 1999 年冬至約略時刻，作迭代初值用
const WINTER_SOLSTICE_1999: f64 = 2451534.82;

/// 保存一歲的曆表數據
#[derive(Debug)]
pub struct Annus {
    /// 序號，為該歲大部分時段所在公元年
    pub annus: i32,
    /// 從冬至開始的各節氣時刻，亦含次歲冬至以便計算末日
    pub solar_term: [Tdb; 25],
    /// 從冬至前第二個朔起連續十六個朔的時刻
    pub new_moon: [Tdb; 16],
}

impl Annus {
    /// 取得公元 `annus` 年對應的歲的曆表，首次取用時推算並緩存。
    ///
    /// 不在 [`FIRST_ANNUS`]`..=`[`LAST_ANNUS`] 範圍則返回 `None`。
    pub fn get(annus: i32) -> Option<Arc<Self>> {
        static CACHE: OnceLock<Mutex<HashMap<i32, Arc<Annus>>>> = OnceLock::new();

        if !(FIRST_ANNUS..=LAST_ANNUS).contains(&annus) {
            return None;
        }
        let mut cache = CACHE
            .get_or_init(Default::default)
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = cache
            .entry(annus)
            .or_insert_with(|| Arc::new(Self::compute(annus)));
        Some(Arc::clone(entry))
    }

    fn compute(annus: i32) -> Self {
        log::trace!("computing ephemeris for annus {annus}");
        let solstice_guess = WINTER_SOLSTICE_1999 + (annus - 2000) as f64 * TROPICAL_YEAR;
        let solar_term = std::array::from_fn(|i| {
            let longitude = (270.0 + 15.0 * i as f64) % 360.0;
            let guess = Tdb(solstice_guess + i as f64 * TROPICAL_YEAR / 24.0);
            solar_longitude_time(longitude, guess)
        });
        let k0 = ((solar_term[0].0 - NEW_MOON_EPOCH) / SYNODIC_MONTH).floor() - 1.0;
        let new_moon = std::array::from_fn(|i| new_moon(k0 + i as f64));
        Annus {
            annus,
            solar_term,
            new_moon,
        }
    }
}

/// 太陽視黃經（度，`0.0..360.0`）
pub fn apparent_solar_longitude(tdb: Tdb) -> f64 {
    let t = (tdb.0 - J2000) / 36525.0;
    let l0 = 280.46646 + t * (36000.76983 + 0.0003032 * t);
    let m = (357.52911 + t * (35999.05029 - 0.0001537 * t)).to_radians();
    let c = (1.914602 - t * (0.004817 + 0.000014 * t)) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();
    let omega = (125.04 - 1934.136 * t).to_radians();
    (l0 + c - 0.00569 - 0.00478 * omega.sin()).rem_euclid(360.0)
}

/// 求太陽視黃經達到 `longitude` 度的時刻，自 `guess` 起迭代，初值誤差宜在一季之內。
pub fn solar_longitude_time(longitude: f64, guess: Tdb) -> Tdb {
    let mut jd = guess.0;
    for _ in 0..50 {
        let step =
            normalize_pm180(longitude - apparent_solar_longitude(Tdb(jd))) * TROPICAL_YEAR / 360.0;
        jd += step;
        if step.abs() < 1e-7 {
            break;
        }
    }
    Tdb(jd)
}

/// 第 `k` 個朔的時刻，`k = 0` 為 2000 年 1 月 6 日之朔，`k` 須為整數。
pub fn new_moon(k: f64) -> Tdb {
    let t = k / 1236.85;
    let t2 = t * t;
    let jde = NEW_MOON_EPOCH
        + SYNODIC_MONTH * k
        + t2 * (0.00015437 + t * (-0.000000150 + 0.00000000073 * t));
    let e = 1.0 - t * (0.002516 + 0.0000074 * t);
    let m = (2.5534 + 29.10535670 * k - t2 * (0.0000014 + 0.00000011 * t)).to_radians();
    let mp = (201.5643 + 385.81693528 * k + t2 * (0.0107582 + t * (0.00001238 - 0.000000058 * t)))
        .to_radians();
    let f = (160.7108 + 390.67050284 * k - t2 * (0.0016118 + t * (0.00000227 - 0.000000011 * t)))
        .to_radians();
    let omega = (124.7746 - 1.56375588 * k + t2 * (0.0020672 + 0.00000215 * t)).to_radians();

    let periodic = -0.40720 * mp.sin()
        + 0.17241 * e * m.sin()
        + 0.01608 * (2.0 * mp).sin()
        + 0.01039 * (2.0 * f).sin()
        + 0.00739 * e * (mp - m).sin()
        - 0.00514 * e * (mp + m).sin()
        + 0.00208 * e * e * (2.0 * m).sin()
        - 0.00111 * (mp - 2.0 * f).sin()
        - 0.00057 * (mp + 2.0 * f).sin()
        + 0.00056 * e * (2.0 * mp + m).sin()
        - 0.00042 * (3.0 * mp).sin()
        + 0.00042 * e * (m + 2.0 * f).sin()
        + 0.00038 * e * (m - 2.0 * f).sin()
        - 0.00024 * e * (2.0 * mp - m).sin()
        - 0.00017 * omega.sin()
        - 0.00007 * (mp + 2.0 * m).sin()
        + 0.00004 * (2.0 * mp - 2.0 * f).sin()
        + 0.00004 * (3.0 * m).sin()
        + 0.00003 * (mp + m - 2.0 * f).sin()
        + 0.00003 * (2.0 * mp + 2.0 * f).sin()
        - 0.00003 * (mp + m + 2.0 * f).sin()
        + 0.00003 * (mp - m + 2.0 * f).sin()
        - 0.00002 * (mp - m - 2.0 * f).sin()
        - 0.00002 * (3.0 * mp + m).sin()
        + 0.00002 * (4.0 * mp).sin();

    // 行星攝動：(常數, k 係數, T² 係數, 振幅)
    const PLANETARY: [(f64, f64, f64, f64); 14] = [
        (299.77, 0.107408, -0.009173, 0.000325),
        (251.88, 0.016321, 0.0, 0.000165),
        (251.83, 26.651886, 0.0, 0.000164),
        (349.42, 36.412478, 0.0, 0.000126),
        (84.66, 18.206239, 0.0, 0.000110),
        (141.74, 53.303771, 0.0, 0.000062),
        (207.14, 2.453732, 0.0, 0.000060),
        (154.84, 7.306860, 0.0, 0.000056),
        (34.52, 27.261239, 0.0, 0.000047),
        (207.19, 0.121824, 0.0, 0.000042),
        (291.34, 1.844379, 0.0, 0.000040),
        (161.72, 24.198154, 0.0, 0.000037),
        (239.56, 25.513099, 0.0, 0.000035),
        (331.55, 3.592518, 0.0, 0.000023),
    ];
    let planetary: f64 = PLANETARY
        .iter()
        .map(|&(a0, a1, a2, w)| w * (a0 + a1 * k + a2 * t2).to_radians().sin())
        .sum();

    Tdb(jde + periodic + planetary)
}

fn normalize_pm180(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}
