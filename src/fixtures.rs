//! Workspace export documents shared by unit tests

/// Three fields: a coded-value domain, a range domain and a free-form field
pub const SCENARIO_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<esri:Workspace xmlns:esri="http://www.esri.com/schemas/ArcGIS/10.8" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <WorkspaceDefinition xsi:type="esri:WorkspaceDefinition">
    <WorkspaceType>esriLocalDatabaseWorkspace</WorkspaceType>
    <Domains xsi:type="esri:ArrayOfDomain">
      <Domain xsi:type="esri:CodedValueDomain">
        <DomainName>StatusDomain</DomainName>
        <FieldType>esriFieldTypeSmallInteger</FieldType>
        <MergePolicy>esriMPTDefaultValue</MergePolicy>
        <SplitPolicy>esriSPTDefaultValue</SplitPolicy>
        <Description>Operational status</Description>
        <Owner></Owner>
        <CodedValues xsi:type="esri:ArrayOfCodedValue">
          <CodedValue xsi:type="esri:CodedValue"><Name>Active</Name><Code xsi:type="xs:short">1</Code></CodedValue>
          <CodedValue xsi:type="esri:CodedValue"><Name>Inactive</Name><Code xsi:type="xs:short">0</Code></CodedValue>
        </CodedValues>
      </Domain>
      <Domain xsi:type="esri:RangeDomain">
        <DomainName>AreaDomain</DomainName>
        <FieldType>esriFieldTypeDouble</FieldType>
        <MergePolicy>esriMPTSumValues</MergePolicy>
        <SplitPolicy>esriSPTGeometryRatio</SplitPolicy>
        <Description>Footprint area</Description>
        <Owner>gis</Owner>
        <MaxValue xsi:type="xs:double">10000</MaxValue>
        <MinValue xsi:type="xs:double">0</MinValue>
      </Domain>
    </Domains>
    <DatasetDefinitions xsi:type="esri:ArrayOfDataElement">
      <DataElement xsi:type="esri:DEFeatureClass">
        <CatalogPath>/FC=Building_A</CatalogPath>
        <Name>Building_A</Name>
        <Fields xsi:type="esri:Fields">
          <FieldArray xsi:type="esri:ArrayOfField">
            <Field xsi:type="esri:Field">
              <Name>status</Name>
              <Type>esriFieldTypeSmallInteger</Type>
              <IsNullable>true</IsNullable>
              <Length>2</Length>
              <Precision>0</Precision>
              <Scale>0</Scale>
              <AliasName>Status</AliasName>
              <Domain xsi:type="esri:CodedValueDomain">
                <DomainName>StatusDomain</DomainName>
              </Domain>
            </Field>
            <Field xsi:type="esri:Field">
              <Name>area</Name>
              <Type>esriFieldTypeDouble</Type>
              <IsNullable>true</IsNullable>
              <Length>8</Length>
              <Precision>0</Precision>
              <Scale>0</Scale>
              <AliasName>Footprint Area</AliasName>
              <Domain xsi:type="esri:RangeDomain">
                <DomainName>AreaDomain</DomainName>
              </Domain>
            </Field>
            <Field xsi:type="esri:Field">
              <Name>notes</Name>
              <Type>esriFieldTypeString</Type>
              <IsNullable>true</IsNullable>
              <Length>255</Length>
              <Precision>0</Precision>
              <Scale>0</Scale>
              <AliasName>Notes</AliasName>
            </Field>
          </FieldArray>
        </Fields>
      </DataElement>
    </DatasetDefinitions>
  </WorkspaceDefinition>
</esri:Workspace>
"#;

/// A fuller workspace: geometry, a dangling domain reference, skipped domains,
/// a table, a second feature class without fields and an index field array
pub const WORKSPACE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<esri:Workspace xmlns:esri="http://www.esri.com/schemas/ArcGIS/10.8" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <WorkspaceDefinition xsi:type="esri:WorkspaceDefinition">
    <WorkspaceType>esriLocalDatabaseWorkspace</WorkspaceType>
    <Domains xsi:type="esri:ArrayOfDomain">
      <Domain xsi:type="esri:CodedValueDomain">
        <DomainName>StatusDomain</DomainName>
        <FieldType>esriFieldTypeSmallInteger</FieldType>
        <MergePolicy>esriMPTDefaultValue</MergePolicy>
        <SplitPolicy>esriSPTDefaultValue</SplitPolicy>
        <Description>Operational status</Description>
        <Owner></Owner>
        <CodedValues xsi:type="esri:ArrayOfCodedValue">
          <CodedValue xsi:type="esri:CodedValue"><Name>Active</Name><Code xsi:type="xs:short">1</Code></CodedValue>
          <CodedValue xsi:type="esri:CodedValue"><Name>Inactive</Name><Code xsi:type="xs:short">0</Code></CodedValue>
        </CodedValues>
      </Domain>
      <Domain xsi:type="esri:RangeDomain">
        <DomainName>AreaDomain</DomainName>
        <FieldType>esriFieldTypeDouble</FieldType>
        <MergePolicy>esriMPTSumValues</MergePolicy>
        <SplitPolicy>esriSPTGeometryRatio</SplitPolicy>
        <Description>Footprint area</Description>
        <Owner>gis</Owner>
        <MaxValue xsi:type="xs:double">10000</MaxValue>
        <MinValue xsi:type="xs:double">0</MinValue>
      </Domain>
      <Domain xsi:type="esri:CodedValueDomain">
        <FieldType>esriFieldTypeString</FieldType>
        <CodedValues xsi:type="esri:ArrayOfCodedValue">
          <CodedValue xsi:type="esri:CodedValue"><Name>Orphan</Name><Code xsi:type="xs:string">O</Code></CodedValue>
        </CodedValues>
      </Domain>
      <Domain xsi:type="esri:CustomDomain">
        <DomainName>WeirdDomain</DomainName>
      </Domain>
      <Domain xsi:type="esri:CodedValueDomain">
        <DomainName>ConditionDomain</DomainName>
        <FieldType>esriFieldTypeString</FieldType>
        <MergePolicy>esriMPTDefaultValue</MergePolicy>
        <SplitPolicy>esriSPTDuplicate</SplitPolicy>
        <Description>Building condition &amp; upkeep</Description>
        <Owner></Owner>
        <CodedValues xsi:type="esri:ArrayOfCodedValue">
          <CodedValue xsi:type="esri:CodedValue"><Name>Good</Name><Code xsi:type="xs:string">G</Code></CodedValue>
          <CodedValue xsi:type="esri:CodedValue"><Name>Fair</Name><Code xsi:type="xs:string">F</Code></CodedValue>
          <CodedValue xsi:type="esri:CodedValue"><Name>Fair, needs &lt;review&gt;</Name><Code xsi:type="xs:string">F</Code></CodedValue>
        </CodedValues>
      </Domain>
    </Domains>
    <DatasetDefinitions xsi:type="esri:ArrayOfDataElement">
      <DataElement xsi:type="esri:DETable">
        <CatalogPath>/OC=Inspection</CatalogPath>
        <Name>Inspection</Name>
        <Fields xsi:type="esri:Fields">
          <FieldArray xsi:type="esri:ArrayOfField">
            <Field xsi:type="esri:Field">
              <Name>inspector</Name>
              <Type>esriFieldTypeString</Type>
            </Field>
          </FieldArray>
        </Fields>
      </DataElement>
      <DataElement xsi:type="esri:DEFeatureClass">
        <CatalogPath>/FC=Building_A</CatalogPath>
        <Name>Building_A</Name>
        <Fields xsi:type="esri:Fields">
          <FieldArray xsi:type="esri:ArrayOfField">
            <Field xsi:type="esri:Field">
              <Name>OBJECTID</Name>
              <Type>esriFieldTypeOID</Type>
              <IsNullable>false</IsNullable>
              <Length>4</Length>
              <Precision>0</Precision>
              <Scale>0</Scale>
              <Required>true</Required>
              <Editable>false</Editable>
              <AliasName>OBJECTID</AliasName>
              <ModelName>OBJECTID</ModelName>
            </Field>
            <Field xsi:type="esri:Field">
              <Name>SHAPE</Name>
              <Type>esriFieldTypeGeometry</Type>
              <IsNullable>true</IsNullable>
              <Length>0</Length>
              <Precision>0</Precision>
              <Scale>0</Scale>
              <Required>true</Required>
              <GeometryDef xsi:type="esri:GeometryDef">
                <AvgNumPoints>0</AvgNumPoints>
                <GeometryType>esriGeometryPolygon</GeometryType>
                <HasM>false</HasM>
                <HasZ>true</HasZ>
                <GridSize0>0.0001</GridSize0>
              </GeometryDef>
              <AliasName>SHAPE</AliasName>
              <ModelName>SHAPE</ModelName>
            </Field>
            <Field xsi:type="esri:Field">
              <Name>status</Name>
              <Type>esriFieldTypeSmallInteger</Type>
              <IsNullable>true</IsNullable>
              <Length>2</Length>
              <Precision>0</Precision>
              <Scale>0</Scale>
              <Editable>true</Editable>
              <AliasName>Status</AliasName>
              <ModelName>status</ModelName>
              <DefaultValue xsi:type="xs:short">1</DefaultValue>
              <Domain xsi:type="esri:CodedValueDomain">
                <DomainName>StatusDomain</DomainName>
                <FieldType>esriFieldTypeSmallInteger</FieldType>
              </Domain>
            </Field>
            <Field xsi:type="esri:Field">
              <Name>area</Name>
              <Type>esriFieldTypeDouble</Type>
              <IsNullable>true</IsNullable>
              <Length>8</Length>
              <Precision>0</Precision>
              <Scale>0</Scale>
              <AliasName>Footprint Area</AliasName>
              <Domain xsi:type="esri:RangeDomain">
                <DomainName>AreaDomain</DomainName>
              </Domain>
            </Field>
            <Field xsi:type="esri:Field">
              <Name>notes</Name>
              <Type>esriFieldTypeString</Type>
              <IsNullable>true</IsNullable>
              <Length>255</Length>
              <Precision>0</Precision>
              <Scale>0</Scale>
              <AliasName>Notes</AliasName>
            </Field>
            <Field xsi:type="esri:Field">
              <Name>condition</Name>
              <Type>esriFieldTypeString</Type>
              <IsNullable>true</IsNullable>
              <Length>1</Length>
              <AliasName>Condition</AliasName>
              <Domain xsi:type="esri:CodedValueDomain">
                <DomainName>ConditionDomain</DomainName>
              </Domain>
            </Field>
            <Field xsi:type="esri:Field">
              <Name>ghost</Name>
              <Type>esriFieldTypeInteger</Type>
              <IsNullable>true</IsNullable>
              <AliasName>Ghost</AliasName>
              <Domain xsi:type="esri:CodedValueDomain">
                <DomainName>GhostDomain</DomainName>
              </Domain>
            </Field>
          </FieldArray>
        </Fields>
        <Indexes xsi:type="esri:Indexes">
          <IndexArray xsi:type="esri:ArrayOfIndex">
            <Index xsi:type="esri:Index">
              <Name>FDO_SHAPE</Name>
              <Fields xsi:type="esri:Fields">
                <FieldArray xsi:type="esri:ArrayOfField">
                  <Field xsi:type="esri:Field">
                    <Name>SHAPE</Name>
                    <Type>esriFieldTypeGeometry</Type>
                  </Field>
                </FieldArray>
              </Fields>
            </Index>
          </IndexArray>
        </Indexes>
      </DataElement>
      <DataElement xsi:type="esri:DEFeatureClass">
        <CatalogPath>/FC=Road_L</CatalogPath>
        <Name>Road_L</Name>
      </DataElement>
    </DatasetDefinitions>
  </WorkspaceDefinition>
</esri:Workspace>
"#;
