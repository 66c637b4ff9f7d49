use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

/// One mappable dictionary entry: a point plus the text the search control
/// matches against and the rendered popup markup.
#[derive(Debug, Clone, PartialEq)]
pub struct PointFeature {
    pub search_text: String,
    pub popup_html: String,
    pub point: GeoPoint,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<PointFeature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, feature: PointFeature) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn to_geojson_value(&self) -> Value {
        let mut root = Map::new();
        root.insert(
            "type".to_string(),
            Value::String("FeatureCollection".to_string()),
        );

        let mut features: Vec<Value> = Vec::with_capacity(self.features.len());
        for feat in &self.features {
            let mut props = Map::new();
            props.insert(
                "search_text".to_string(),
                Value::String(feat.search_text.clone()),
            );
            props.insert("popup".to_string(), Value::String(feat.popup_html.clone()));

            let mut geometry = Map::new();
            geometry.insert("type".to_string(), Value::String("Point".to_string()));
            geometry.insert(
                "coordinates".to_string(),
                Value::Array(vec![
                    Value::from(feat.point.lon_deg),
                    Value::from(feat.point.lat_deg),
                ]),
            );

            let mut fobj = Map::new();
            fobj.insert("type".to_string(), Value::String("Feature".to_string()));
            fobj.insert("properties".to_string(), Value::Object(props));
            fobj.insert("geometry".to_string(), Value::Object(geometry));
            features.push(Value::Object(fobj));
        }

        root.insert("features".to_string(), Value::Array(features));
        Value::Object(root)
    }

    pub fn to_geojson_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_geojson_value())
    }

    pub fn to_geojson_string_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_geojson_value())
    }
}

#[cfg(test)]
mod tests {
    use super::{FeatureCollection, GeoPoint, PointFeature};

    fn sample() -> FeatureCollection {
        let mut collection = FeatureCollection::new();
        collection.push(PointFeature {
            search_text: "برّاد tea pot".to_string(),
            popup_html: "<div>popup</div>".to_string(),
            point: GeoPoint::new(9.0, 34.0),
        });
        collection
    }

    #[test]
    fn emits_a_feature_collection_with_lon_first_coordinates() {
        let value = sample().to_geojson_value();
        assert_eq!(value["type"], "FeatureCollection");

        let features = value["features"].as_array().expect("features array");
        assert_eq!(features.len(), 1);
        assert_eq!(features[0]["type"], "Feature");
        assert_eq!(features[0]["geometry"]["type"], "Point");

        let coords = features[0]["geometry"]["coordinates"]
            .as_array()
            .expect("coordinates");
        assert_eq!(coords[0].as_f64(), Some(9.0));
        assert_eq!(coords[1].as_f64(), Some(34.0));
    }

    #[test]
    fn properties_carry_search_text_and_popup() {
        let value = sample().to_geojson_value();
        let props = &value["features"][0]["properties"];
        assert_eq!(props["search_text"], "برّاد tea pot");
        assert_eq!(props["popup"], "<div>popup</div>");
    }
}
