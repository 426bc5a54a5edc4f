pub mod charger_api;
