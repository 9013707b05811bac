pub mod temperature {
    pub fn f2c(temp_f: f64) -> f64 {
        (temp_f - 32.0) * 5.0 / 9.0
    }

    pub fn c2f(temp_c: f64) -> f64 {
        temp_c * 9.0 / 5.0 + 32.0
    }

    #[test]
    fn test_temperature() {
        assert_eq!(f2c(212.0), 100.0);
        assert_eq!(f2c(32.0), 0.0);
        assert_eq!(c2f(0.0), 32.0);
        assert_eq!(c2f(100.0), 212.0);
        assert_eq!(f2c(-40.0), -40.0);
    }
}

pub mod speed {
    const METERS_PER_MILE: f64 = 1609.34;
    const SECONDS_PER_HOUR: f64 = 3600.0;

    pub fn mph2ms(mph: f64) -> f64 {
        mph * METERS_PER_MILE / SECONDS_PER_HOUR
    }

    #[test]
    fn test_mph2ms() {
        assert_eq!(mph2ms(0.0), 0.0);
        assert!((mph2ms(10.0) - 4.470_388).abs() < 1e-6);
    }
}
