mod invalid_json;
mod round_trip;
