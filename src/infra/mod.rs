pub mod ev_charger;
