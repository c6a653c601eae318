use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

struct Municipality {
    code: &'static str,
    name: &'static str,
    department: &'static str,
    lat: f64,
    lon: f64,
    base_price: f64,
}

const MUNICIPALITIES: &[Municipality] = &[
    Municipality { code: "11001", name: "BOGOTA D.C.", department: "CUNDINAMARCA", lat: 4.60971, lon: -74.08175, base_price: 2450.0 },
    Municipality { code: "25754", name: "SOACHA", department: "CUNDINAMARCA", lat: 4.57937, lon: -74.21682, base_price: 2480.0 },
    Municipality { code: "05001", name: "MEDELLIN", department: "ANTIOQUIA", lat: 6.25184, lon: -75.56359, base_price: 2700.0 },
    Municipality { code: "05088", name: "BELLO", department: "ANTIOQUIA", lat: 6.33732, lon: -75.55795, base_price: 2720.0 },
    Municipality { code: "08001", name: "BARRANQUILLA", department: "ATLANTICO", lat: 10.96854, lon: -74.78132, base_price: 2300.0 },
    Municipality { code: "13001", name: "CARTAGENA", department: "BOLIVAR", lat: 10.39972, lon: -75.51444, base_price: 2350.0 },
    Municipality { code: "76001", name: "CALI", department: "VALLE DEL CAUCA", lat: 3.45164, lon: -76.53199, base_price: 2950.0 },
    Municipality { code: "68001", name: "BUCARAMANGA", department: "SANTANDER", lat: 7.11935, lon: -73.12274, base_price: 2600.0 },
    Municipality { code: "54001", name: "CUCUTA", department: "NORTE DE SANTANDER", lat: 7.89391, lon: -72.50782, base_price: 2200.0 },
    Municipality { code: "73001", name: "IBAGUE", department: "TOLIMA", lat: 4.43889, lon: -75.23222, base_price: 2850.0 },
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "precios.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;

    writer
        .write_record([
            "FECHA_PRECIO",
            "PRECIO_PROMEDIO_PUBLICADO",
            "CODIGO_MUNICIPIO_DANE",
            "MUNICIPIO_EDS",
            "DEPARTAMENTO_EDS",
            "TIPO_COMBUSTIBLE",
            "LATITUD_MUNICIPIO",
            "LONGITUD_MUNICIPIO",
            "ANIO_PRECIO",
            "MES_PRECIO",
        ])
        .context("writing header")?;

    let start = NaiveDate::from_ymd_opt(2024, 10, 1).context("valid start date")?;
    let mut rows = 0usize;

    // Weekly reports per municipality, so every municipality has many
    // duplicate codes with different dates (dedup fodder for the map view).
    for week in 0..48 {
        let date = start + Duration::weeks(week);
        for muni in MUNICIPALITIES {
            let price = muni.base_price + rng.range(-120.0, 180.0) + week as f64 * 2.5;

            // A few rows with unparseable cells, like the real export.
            let price_cell = if rng.next_f64() < 0.02 {
                "N/D".to_string()
            } else {
                format!("{price:.1}")
            };
            let date_cell = if rng.next_f64() < 0.01 {
                "sin fecha".to_string()
            } else {
                date.format("%Y-%m-%d").to_string()
            };

            let lat_cell = format!("{:.5}", muni.lat);
            let lon_cell = format!("{:.5}", muni.lon);
            let year_cell = date.year().to_string();
            let month_cell = date.month().to_string();
            writer
                .write_record([
                    date_cell.as_str(),
                    price_cell.as_str(),
                    muni.code,
                    muni.name,
                    muni.department,
                    "GNCV",
                    lat_cell.as_str(),
                    lon_cell.as_str(),
                    year_cell.as_str(),
                    month_cell.as_str(),
                ])
                .with_context(|| format!("writing row for {}", muni.code))?;
            rows += 1;
        }
    }

    // One station misgeocoded outside the Colombia bounding box.
    writer
        .write_record([
            "2025-01-15",
            "2500.0",
            "99999",
            "NOWHERE",
            "CUNDINAMARCA",
            "GNCV",
            "41.00000",
            "2.00000",
            "2025",
            "1",
        ])
        .context("writing misgeocoded row")?;
    rows += 1;

    writer.flush().context("flushing output")?;
    println!("Wrote {rows} price reports to {output_path}");
    Ok(())
}
