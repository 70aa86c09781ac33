use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    // Copy the demonstration dataset to OUT_DIR for include_str
    let fixture = Path::new("../fixtures/air_quality.csv");
    if fixture.exists() {
        fs::copy(fixture, Path::new(&out_dir).join("air_quality.csv")).unwrap();
    } else {
        fs::write(
            Path::new(&out_dir).join("air_quality.csv"),
            "No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station\n",
        )
        .unwrap();
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../fixtures/air_quality.csv");
}
