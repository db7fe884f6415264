//! High-level scene loading.
//!
//! `.json` files are deserialized straight into [`Scene`]. Everything else
//! is read as an XML scene description:
//!
//! ```xml
//! <Scene>
//!     <BackgroundColor>0 0 0</BackgroundColor>
//!     <Cameras>
//!         <Camera id="1">
//!             <Position>0 0 0</Position>
//!             <Gaze>0 0 -1</Gaze>
//!             <Up>0 1 0</Up>
//!             <NearPlane>-1 1 -1 1</NearPlane>
//!             <NearDistance>1</NearDistance>
//!             <ImageResolution>800 800</ImageResolution>
//!             <ImageName>simple.ppm</ImageName>
//!         </Camera>
//!     </Cameras>
//!     <Materials>
//!         <Material id="1">
//!             <DiffuseReflectance>1 1 1</DiffuseReflectance>
//!         </Material>
//!     </Materials>
//!     <VertexData>0 0 -2</VertexData>
//!     <Objects>
//!         <Sphere id="1">
//!             <Material>1</Material>
//!             <Center>1</Center>
//!             <Radius>0.3</Radius>
//!         </Sphere>
//!     </Objects>
//! </Scene>
//! ```
//!
//! Material and vertex references in XML are one-based.

use std::path::Path;
use std::str::FromStr;

use orb_math::Vec3;
use thiserror::Error;

use crate::format::xml::{parse_xml, ParseError, XmlElement};
use crate::scene::{Camera, Material, NearPlane, Scene, Sphere};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a <Scene> root element, found <{0}>")]
    UnexpectedRoot(String),

    #[error("Missing <{element}> in <{parent}> at line {line}")]
    MissingElement {
        element: String,
        parent: String,
        line: usize,
    },

    #[error("Invalid number '{text}' in <{element}> at line {line}")]
    InvalidNumber {
        text: String,
        element: String,
        line: usize,
    },

    #[error("Expected {expected} values in <{element}> at line {line}, found {found}")]
    WrongValueCount {
        element: String,
        expected: usize,
        found: usize,
        line: usize,
    },

    #[error("Invalid {kind} reference {id} at line {line} (ids start at 1)")]
    InvalidReference {
        kind: &'static str,
        id: usize,
        line: usize,
    },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene file.
///
/// The format is picked from the extension: `.json` for JSON, anything
/// else is parsed as XML.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let scene = if is_json {
        load_scene_from_json(&content)?
    } else {
        load_scene_from_xml(&content)?
    };

    log::debug!(
        "Loaded {}: {} vertices, {} spheres, {} materials, {} cameras",
        path.display(),
        scene.vertex_count(),
        scene.sphere_count(),
        scene.material_count(),
        scene.camera_count()
    );

    Ok(scene)
}

/// Load a scene from a JSON string.
pub fn load_scene_from_json(content: &str) -> LoadResult<Scene> {
    Ok(serde_json::from_str(content)?)
}

/// Load a scene from an XML string.
pub fn load_scene_from_xml(content: &str) -> LoadResult<Scene> {
    let root = parse_xml(content)?;
    if root.name != "Scene" {
        return Err(LoadError::UnexpectedRoot(root.name));
    }

    let background = match root.child("BackgroundColor") {
        Some(element) => parse_vec3(element)?,
        None => Vec3::ZERO,
    };
    let mut scene = Scene::new(background);

    for child in &root.children {
        match child.name.as_str() {
            "BackgroundColor" => {}
            "Cameras" => {
                for camera in child.children_named("Camera") {
                    scene.add_camera(parse_camera(camera)?);
                }
            }
            "Materials" => {
                for material in child.children_named("Material") {
                    scene.add_material(parse_material(material)?);
                }
            }
            "VertexData" => {
                for position in parse_vertex_data(child)? {
                    scene.add_vertex(position);
                }
            }
            "Objects" => {
                for object in &child.children {
                    if object.name == "Sphere" {
                        scene.add_sphere(parse_sphere(object)?);
                    } else {
                        log::trace!("Skipping <{}> at line {}", object.name, object.line);
                    }
                }
            }
            other => log::trace!("Skipping <{}> at line {}", other, child.line),
        }
    }

    Ok(scene)
}

fn parse_camera(element: &XmlElement) -> LoadResult<Camera> {
    let plane = parse_values::<f32>(required(element, "NearPlane")?, 4)?;
    let resolution = parse_values::<u32>(required(element, "ImageResolution")?, 2)?;

    let camera = Camera::new(
        parse_vec3(required(element, "Position")?)?,
        parse_vec3(required(element, "Gaze")?)?,
        parse_vec3(required(element, "Up")?)?,
        NearPlane::new(plane[0], plane[1], plane[2], plane[3]),
        parse_values::<f32>(required(element, "NearDistance")?, 1)?[0],
        resolution[0],
        resolution[1],
    );

    Ok(match element.child("ImageName") {
        Some(name) => camera.with_image_name(name.trimmed_text()),
        None => camera,
    })
}

fn parse_material(element: &XmlElement) -> LoadResult<Material> {
    Ok(Material::new(parse_vec3(required(element, "DiffuseReflectance")?)?))
}

fn parse_sphere(element: &XmlElement) -> LoadResult<Sphere> {
    let material_id = parse_reference(required(element, "Material")?, "material")?;
    let center_vertex_id = parse_reference(required(element, "Center")?, "vertex")?;
    let radius = parse_values::<f32>(required(element, "Radius")?, 1)?[0];

    Ok(Sphere::new(center_vertex_id, radius, material_id))
}

fn parse_vertex_data(element: &XmlElement) -> LoadResult<Vec<Vec3>> {
    let values = parse_all::<f32>(element)?;
    if values.len() % 3 != 0 {
        return Err(LoadError::WrongValueCount {
            element: element.name.clone(),
            expected: values.len().next_multiple_of(3),
            found: values.len(),
            line: element.line,
        });
    }

    Ok(values.chunks_exact(3).map(Vec3::from_slice).collect())
}

/// Convert a one-based id into a zero-based index.
fn parse_reference(element: &XmlElement, kind: &'static str) -> LoadResult<usize> {
    let id = parse_values::<usize>(element, 1)?[0];
    id.checked_sub(1).ok_or(LoadError::InvalidReference {
        kind,
        id,
        line: element.line,
    })
}

fn required<'e>(parent: &'e XmlElement, name: &str) -> LoadResult<&'e XmlElement> {
    parent.child(name).ok_or_else(|| LoadError::MissingElement {
        element: name.to_string(),
        parent: parent.name.clone(),
        line: parent.line,
    })
}

fn parse_vec3(element: &XmlElement) -> LoadResult<Vec3> {
    let values = parse_values::<f32>(element, 3)?;
    Ok(Vec3::from_slice(&values))
}

/// Parse exactly `count` whitespace separated values.
fn parse_values<T: FromStr>(element: &XmlElement, count: usize) -> LoadResult<Vec<T>> {
    let values = parse_all(element)?;
    if values.len() != count {
        return Err(LoadError::WrongValueCount {
            element: element.name.clone(),
            expected: count,
            found: values.len(),
            line: element.line,
        });
    }
    Ok(values)
}

fn parse_all<T: FromStr>(element: &XmlElement) -> LoadResult<Vec<T>> {
    element
        .trimmed_text()
        .split_whitespace()
        .map(|token| {
            token.parse::<T>().map_err(|_| LoadError::InvalidNumber {
                text: token.to_string(),
                element: element.name.clone(),
                line: element.line,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_XML: &str = r#"<Scene>
    <MaxRecursionDepth>6</MaxRecursionDepth>
    <BackgroundColor>0 0 0</BackgroundColor>
    <ShadowRayEpsilon>1e-3</ShadowRayEpsilon>
    <Cameras>
        <Camera id="1">
            <Position>0 0 5</Position>
            <Gaze>0 0 -1</Gaze>
            <Up>0 1 0</Up>
            <NearPlane>-1 1 -1 1</NearPlane>
            <NearDistance>1</NearDistance>
            <ImageResolution>2 2</ImageResolution>
            <ImageName>simple.ppm</ImageName>
        </Camera>
    </Cameras>
    <Lights>
        <AmbientLight>25 25 25</AmbientLight>
        <PointLight id="1">
            <Position>0 4 2</Position>
            <Intensity>1000 1000 1000</Intensity>
        </PointLight>
    </Lights>
    <Materials>
        <Material id="1">
            <AmbientReflectance>1 1 1</AmbientReflectance>
            <DiffuseReflectance>200 100 50</DiffuseReflectance>
            <SpecularReflectance>1 1 1</SpecularReflectance>
            <PhongExponent>1</PhongExponent>
        </Material>
    </Materials>
    <VertexData>
        0 0 0
        3 0 0
    </VertexData>
    <Objects>
        <Triangle id="1">
            <Material>1</Material>
            <Indices>1 2 1</Indices>
        </Triangle>
        <Sphere id="1">
            <Material>1</Material>
            <Center>2</Center>
            <Radius>0.5</Radius>
        </Sphere>
    </Objects>
</Scene>
"#;

    #[test]
    fn test_load_simple_xml() {
        let scene = load_scene_from_xml(SIMPLE_XML).unwrap();

        assert_eq!(scene.background_color, Vec3::ZERO);
        assert_eq!(scene.vertex_data, vec![Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)]);
        assert_eq!(scene.materials, vec![Material::new(Vec3::new(200.0, 100.0, 50.0))]);

        // One-based ids become zero-based indices
        assert_eq!(scene.spheres, vec![Sphere::new(1, 0.5, 0)]);

        let camera = scene.primary_camera().unwrap();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.gaze, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(camera.up, Vec3::Y);
        assert_eq!(camera.near_plane, NearPlane::new(-1.0, 1.0, -1.0, 1.0));
        assert_eq!(camera.near_distance, 1.0);
        assert_eq!((camera.image_width, camera.image_height), (2, 2));
        assert_eq!(camera.image_name, "simple.ppm");
    }

    #[test]
    fn test_json_matches_xml() {
        let from_xml = load_scene_from_xml(SIMPLE_XML).unwrap();
        let json = serde_json::to_string(&from_xml).unwrap();
        let from_json = load_scene_from_json(&json).unwrap();

        assert_eq!(from_xml, from_json);
    }

    #[test]
    fn test_json_defaults() {
        let scene = load_scene_from_json(
            r#"{
                "vertex_data": [[0, 0, 0]],
                "spheres": [{ "center_vertex_id": 0, "radius": 1.0, "material_id": 0 }],
                "materials": [{ "diffuse": [255, 0, 0] }]
            }"#,
        )
        .unwrap();

        assert_eq!(scene.background_color, Vec3::ZERO);
        assert_eq!(scene.sphere_count(), 1);
        assert_eq!(scene.camera_count(), 0);
    }

    #[test]
    fn test_zero_reference_is_rejected() {
        let xml = r#"<Scene><Objects><Sphere id="1">
            <Material>0</Material><Center>1</Center><Radius>1</Radius>
        </Sphere></Objects></Scene>"#;

        let err = load_scene_from_xml(xml).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidReference { kind: "material", id: 0, .. }
        ));
    }

    #[test]
    fn test_missing_element() {
        let xml = "<Scene><Materials><Material id=\"1\"></Material></Materials></Scene>";
        let err = load_scene_from_xml(xml).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingElement { ref element, .. } if element == "DiffuseReflectance"
        ));
    }

    #[test]
    fn test_invalid_number() {
        let xml = "<Scene><BackgroundColor>0 zero 0</BackgroundColor></Scene>";
        let err = load_scene_from_xml(xml).unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { ref text, .. } if text == "zero"));
    }

    #[test]
    fn test_incomplete_vertex_data() {
        let xml = "<Scene><VertexData>0 0 0 1 1</VertexData></Scene>";
        let err = load_scene_from_xml(xml).unwrap_err();
        assert!(matches!(
            err,
            LoadError::WrongValueCount { expected: 6, found: 5, .. }
        ));
    }

    #[test]
    fn test_wrong_root() {
        let err = load_scene_from_xml("<World></World>").unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedRoot(ref name) if name == "World"));
    }

    #[test]
    fn test_load_scene_from_file() {
        let _ = env_logger::builder().is_test(true).try_init();

        let dir = std::env::temp_dir().join("orb_core_loader_test");
        std::fs::create_dir_all(&dir).unwrap();

        let xml_path = dir.join("simple.xml");
        std::fs::write(&xml_path, SIMPLE_XML).unwrap();
        let from_xml = load_scene(&xml_path).unwrap();

        let json_path = dir.join("simple.json");
        std::fs::write(&json_path, serde_json::to_string_pretty(&from_xml).unwrap()).unwrap();
        let from_json = load_scene(&json_path).unwrap();

        assert_eq!(from_xml, from_json);
        assert!(matches!(load_scene(dir.join("missing.xml")), Err(LoadError::Io(_))));
    }

    #[test]
    fn test_bundled_scenes_agree() {
        let from_xml = load_scene_from_xml(include_str!("../../../../scenes/two_spheres.xml")).unwrap();
        let from_json = load_scene_from_json(include_str!("../../../../scenes/two_spheres.json")).unwrap();

        assert_eq!(from_xml, from_json);
        assert_eq!(from_xml.sphere_count(), 2);
        assert_eq!(from_xml.primary_camera().unwrap().image_name, "two_spheres.ppm");
    }

    #[test]
    fn test_deeply_nested_scene_is_rejected() {
        let content = format!("<Scene>{}{}</Scene>", "<Objects>".repeat(10_000), "</Objects>".repeat(10_000));
        let err = load_scene_from_xml(&content).unwrap_err();
        assert!(matches!(err, LoadError::Xml(ParseError::Syntax { .. })));
    }
}
