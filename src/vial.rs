include!(concat!(env!("OUT_DIR"), "/config_generated.rs"));
